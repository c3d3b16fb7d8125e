pub(crate) use crate::error::RoasterError;
pub(crate) use crate::roast::Language;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::Json;
pub(crate) use axum::extract::{Query, State};
pub(crate) use serde::Deserialize;
pub(crate) use serde_json::{Value, json};
pub(crate) use tracing::{error, info};
