//! JSON endpoints backing the home page.

use super::prelude::*;
use crate::topics::{load_daily_topic, trending_topics};

#[derive(Deserialize)]
pub(crate) struct LangQuery {
    lang: Option<String>,
}

impl LangQuery {
    fn language(&self) -> Language {
        Language::from_param(self.lang.as_deref())
    }
}

pub(crate) async fn stats_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "total_roasts": state.total_roasts().await,
        "success": true,
    }))
}

pub(crate) async fn daily_topic_handler(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Json<Value> {
    let topic = load_daily_topic(&state.daily_topic_path, query.language()).await;
    Json(json!({ "success": true, "data": topic }))
}

pub(crate) async fn trending_handler(Query(query): Query<LangQuery>) -> Json<Value> {
    Json(json!({ "success": true, "topics": trending_topics(query.language()) }))
}

pub(crate) async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "search": false }))
}
