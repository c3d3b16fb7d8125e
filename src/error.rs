//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::{error, info};

/// definitions for the roaster application.
#[derive(Debug)]
pub enum RoasterError {
    /// When you didn't do the right thing, with the message to show
    BadRequest(String),
    /// When the meme pool can't supply an image
    MemePool(String),
    /// When DB operations fail
    DatabaseError(sea_orm::DbErr),
    /// When a meme can't be decoded or the result can't be encoded
    ImageError(image::ImageError),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for RoasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "Bad request: {message}"),
            Self::MemePool(message) => write!(f, "Meme pool: {message}"),
            Self::DatabaseError(err) => write!(f, "Database error: {err}"),
            Self::ImageError(err) => write!(f, "Image error: {err}"),
            Self::InternalServerError(message) => write!(f, "Internal server error: {message}"),
        }
    }
}

impl std::error::Error for RoasterError {}

impl From<sea_orm::DbErr> for RoasterError {
    fn from(err: sea_orm::DbErr) -> Self {
        RoasterError::DatabaseError(err)
    }
}

impl From<std::io::Error> for RoasterError {
    fn from(err: std::io::Error) -> Self {
        RoasterError::InternalServerError(err.to_string())
    }
}

impl From<image::ImageError> for RoasterError {
    fn from(err: image::ImageError) -> Self {
        RoasterError::ImageError(err)
    }
}

impl From<tokio::task::JoinError> for RoasterError {
    fn from(err: tokio::task::JoinError) -> Self {
        RoasterError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for RoasterError {
    fn from(err: axum::http::Error) -> Self {
        RoasterError::InternalServerError(err.to_string())
    }
}

fn json_error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for RoasterError {
    fn into_response(self) -> axum::response::Response {
        match self {
            RoasterError::BadRequest(message) => {
                info!("Bad request received: {}", message);
                json_error(StatusCode::BAD_REQUEST, &message)
            }
            RoasterError::MemePool(message) => {
                error!("Meme pool error: {}", message);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
            RoasterError::DatabaseError(err) => {
                error!("Database error: {}", err);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            RoasterError::ImageError(err) => {
                error!("Image error: {}", err);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Image error")
            }
            RoasterError::InternalServerError(message) => {
                error!("Internal server error: {}", message);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
