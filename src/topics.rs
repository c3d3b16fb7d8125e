//! Daily topic file and curated trending lists.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::roast::Language;

/// A topic suggestion shown on the home page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyTopic {
    /// What gets roasted.
    pub topic: String,
    /// Suggested label.
    pub label: String,
    /// One-line teaser.
    pub description: String,
}

/// A topic pair scheduled for a future date.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpcomingTopic {
    /// `YYYY-MM-DD` the pair goes live.
    pub date: String,
    /// Hindi variant.
    pub hindi: DailyTopic,
    /// English variant.
    pub english: DailyTopic,
}

/// The daily topic file. Keys this service doesn't know about are kept as-is
/// when the file is rewritten.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DailyTopicFile {
    /// Date the current pair went live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Current Hindi topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi: Option<DailyTopic>,
    /// Current English topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<DailyTopic>,
    /// Scheduled pairs.
    #[serde(default)]
    pub upcoming: Vec<UpcomingTopic>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DailyTopicFile {
    /// Parses the file at `path`.
    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Current topic for `language`, if the file has one.
    pub fn topic(&self, language: Language) -> Option<&DailyTopic> {
        match language {
            Language::Hindi => self.hindi.as_ref(),
            Language::English => self.english.as_ref(),
        }
    }

    /// Makes the upcoming pair dated `today` current and drops it from the
    /// schedule. Returns false when nothing is scheduled for today.
    pub fn promote_upcoming(&mut self, today: NaiveDate) -> bool {
        let today = today.format("%Y-%m-%d").to_string();
        let Some(index) = self.upcoming.iter().position(|entry| entry.date == today) else {
            return false;
        };
        let entry = self.upcoming.remove(index);
        self.date = Some(today);
        self.hindi = Some(entry.hindi);
        self.english = Some(entry.english);
        true
    }
}

/// Topic shown when the file can't supply one.
pub fn fallback_daily_topic() -> DailyTopic {
    DailyTopic {
        topic: "Gym People".to_string(),
        label: "Gym Tourist".to_string(),
        description: "Selfie > Workout".to_string(),
    }
}

/// Today's topic for `language`, or the fallback topic.
pub async fn load_daily_topic(path: &Path, language: Language) -> DailyTopic {
    match DailyTopicFile::read(path).await {
        Ok(file) => file
            .topic(language)
            .cloned()
            .unwrap_or_else(fallback_daily_topic),
        Err(err) => {
            debug!("Daily topic unavailable from {}: {:#}", path.display(), err);
            fallback_daily_topic()
        }
    }
}

const TRENDING_INDIA: &[&str] = &[
    "IPL 2025",
    "Bollywood",
    "JEE Results",
    "Stock Market",
    "Instagram Reels",
    "Startup Funding",
    "AI Jobs",
    "Crypto",
];

const TRENDING_GLOBAL: &[&str] = &[
    "ChatGPT",
    "Taylor Swift",
    "Elon Musk",
    "Netflix",
    "iPhone",
    "Tesla",
    "AI",
    "Crypto",
];

/// Curated trending topics: India for Hindi, global for English.
pub fn trending_topics(language: Language) -> &'static [&'static str] {
    match language {
        Language::Hindi => TRENDING_INDIA,
        Language::English => TRENDING_GLOBAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn topic(name: &str) -> DailyTopic {
        DailyTopic {
            topic: name.to_string(),
            label: format!("{name} label"),
            description: format!("{name} description"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn promotes_todays_entry() {
        let mut file = DailyTopicFile {
            date: Some("2026-10-16".to_string()),
            hindi: Some(topic("old hindi")),
            english: Some(topic("old english")),
            upcoming: vec![
                UpcomingTopic {
                    date: "2026-10-17".to_string(),
                    hindi: topic("Engineers"),
                    english: topic("Engineers EN"),
                },
                UpcomingTopic {
                    date: "2026-10-18".to_string(),
                    hindi: topic("Startups"),
                    english: topic("Startups EN"),
                },
            ],
            ..Default::default()
        };

        assert!(file.promote_upcoming(date(2026, 10, 17)));
        assert_eq!(file.date.as_deref(), Some("2026-10-17"));
        assert_eq!(file.topic(Language::Hindi), Some(&topic("Engineers")));
        assert_eq!(file.topic(Language::English), Some(&topic("Engineers EN")));
        assert_eq!(file.upcoming.len(), 1);
        assert_eq!(file.upcoming[0].date, "2026-10-18");

        // already used
        assert!(!file.promote_upcoming(date(2026, 10, 17)));
    }

    #[test]
    fn nothing_scheduled_leaves_file_alone() {
        let mut file = DailyTopicFile {
            hindi: Some(topic("keep")),
            ..Default::default()
        };
        let before = file.clone();
        assert!(!file.promote_upcoming(date(2030, 1, 1)));
        assert_eq!(file, before);
    }

    #[test]
    fn unknown_keys_survive_a_rewrite() {
        let raw = json!({
            "hindi": {"topic": "a", "label": "b", "description": "c"},
            "theme": "diwali",
        });
        let file: DailyTopicFile = serde_json::from_value(raw).expect("parse");
        let written = serde_json::to_value(&file).expect("serialize");
        assert_eq!(written["theme"], "diwali");
        assert_eq!(written["hindi"]["label"], "b");
        assert!(written.get("english").is_none());
    }

    #[tokio::test]
    async fn load_falls_back_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("daily_topic.json");
        assert_eq!(
            load_daily_topic(&missing, Language::Hindi).await,
            fallback_daily_topic()
        );

        std::fs::write(&missing, "{ not json").expect("write");
        assert_eq!(
            load_daily_topic(&missing, Language::English).await,
            fallback_daily_topic()
        );

        std::fs::write(
            &missing,
            json!({"english": {"topic": "Netflix", "label": "Binger", "description": "One more episode"}})
                .to_string(),
        )
        .expect("write");
        assert_eq!(
            load_daily_topic(&missing, Language::English).await.topic,
            "Netflix"
        );
        assert_eq!(
            load_daily_topic(&missing, Language::Hindi).await,
            fallback_daily_topic()
        );
    }

    #[test]
    fn trending_lists_differ_by_language() {
        assert!(trending_topics(Language::Hindi).contains(&"Bollywood"));
        assert!(trending_topics(Language::English).contains(&"Netflix"));
    }
}
