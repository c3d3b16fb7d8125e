use super::prelude::*;
use crate::topics::{DailyTopic, load_daily_topic, trending_topics};

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) total_roasts: i64,
    pub(crate) daily_topic: DailyTopic,
    pub(crate) trending: Vec<String>,
}

/// handles the / GET
pub(crate) async fn root_handler(
    State(state): State<AppState>,
) -> Result<HomeTemplate, RoasterError> {
    let language = Language::default();
    let daily_topic = load_daily_topic(&state.daily_topic_path, language).await;
    let trending = trending_topics(language)
        .iter()
        .map(|topic| topic.to_string())
        .collect();

    Ok(HomeTemplate {
        total_roasts: state.total_roasts().await,
        daily_topic,
        trending,
    })
}
