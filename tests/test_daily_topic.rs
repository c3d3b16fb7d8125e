use chrono::NaiveDate;
use roaster::roast::Language;
use roaster::topics::{DailyTopicFile, fallback_daily_topic, load_daily_topic};
use serde_json::json;

#[tokio::test]
async fn promoted_file_is_served_after_rewrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daily_topic.json");
    let raw = json!({
        "date": "2026-10-16",
        "hindi": {"topic": "Gym People", "label": "Gym Tourist", "description": "Selfie > Workout"},
        "english": {"topic": "Gym People", "label": "Gym Tourist", "description": "Selfie > Workout"},
        "upcoming": [{
            "date": "2026-10-17",
            "hindi": {"topic": "Engineers", "label": "Jugaadu", "description": "Stack Overflow ka bhakt"},
            "english": {"topic": "Engineers", "label": "Bug Farmer", "description": "Works on my machine"}
        }],
        "source": "manual"
    });
    std::fs::write(&path, raw.to_string()).expect("write topic file");

    let mut file = DailyTopicFile::read(&path).await.expect("read");
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("date");
    assert!(file.promote_upcoming(today));
    std::fs::write(&path, serde_json::to_string_pretty(&file).expect("serialize"))
        .expect("rewrite");

    let english = load_daily_topic(&path, Language::English).await;
    assert_eq!(english.label, "Bug Farmer");
    let hindi = load_daily_topic(&path, Language::Hindi).await;
    assert_eq!(hindi.label, "Jugaadu");

    let rewritten: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read back")).expect("json");
    assert_eq!(rewritten["date"], "2026-10-17");
    assert_eq!(rewritten["source"], "manual");
    assert_eq!(rewritten["upcoming"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn missing_file_serves_fallback() {
    let dir = tempfile::tempdir().expect("tempdir");
    let topic = load_daily_topic(&dir.path().join("nope.json"), Language::English).await;
    assert_eq!(topic, fallback_daily_topic());
}
