//! The roast endpoint: meme + LLM roast + caption.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;

use super::prelude::*;
use crate::caption::render_roast;
use crate::db::entities::roasts::record_roast;

#[derive(Deserialize)]
pub(crate) struct RoastQuery {
    #[serde(default)]
    topic: String,
    lang: Option<String>,
}

/// handles /roast?topic=&lang=
pub(crate) async fn roast_handler(
    State(state): State<AppState>,
    Query(query): Query<RoastQuery>,
) -> Result<Response, RoasterError> {
    let topic = query.topic.trim();
    if topic.is_empty() {
        return Err(RoasterError::BadRequest("No topic".to_string()));
    }
    let language = Language::from_param(query.lang.as_deref());

    let meme = state.memes.pick().await?;
    let roast = state.roaster.generate(topic, language).await;

    let font = state.font.clone();
    let label = roast.label.clone();
    let body = roast.body.clone();
    let meme_name = meme.display().to_string();
    let jpeg =
        tokio::task::spawn_blocking(move || render_roast(&meme, &font, &label, &body)).await??;

    if let Err(err) = record_roast(&state.db, topic, &roast, language).await {
        error!("Failed to record roast for {topic:?}: {err}");
    }
    info!("Roasted {topic:?} ({language}) onto {meme_name}");

    Response::builder()
        .header(CONTENT_TYPE, "image/jpeg")
        .body(Body::from(jpeg))
        .map_err(RoasterError::from)
}
