//! Roast text generation against an OpenAI-compatible chat completions API.
//!
//! Models are tried in their configured order; the first usable reply wins
//! and a fixed fallback pair covers the case where none answer.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::LLM_TIMEOUT_SECONDS;

/// Language a roast is written in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hinglish, the default
    #[default]
    #[sea_orm(string_value = "hindi")]
    Hindi,
    /// English
    #[sea_orm(string_value = "english")]
    English,
}

impl Language {
    /// Maps the `lang` request parameter: missing or `hindi` is Hindi,
    /// anything else is English.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None => Self::Hindi,
            Some(value) if value.eq_ignore_ascii_case("hindi") => Self::Hindi,
            Some(_) => Self::English,
        }
    }

    /// Lowercase name, as stored and as used in the daily topic file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hindi => "hindi",
            Self::English => "english",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated roast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Roast {
    /// Short title, drawn as the banner.
    pub label: String,
    /// The roast itself, drawn as the caption.
    pub body: String,
}

impl Roast {
    fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

fn fallback_label(language: Language) -> &'static str {
    match language {
        Language::Hindi => "Certified Nalla",
        Language::English => "Certified Clown",
    }
}

/// The roast used when no model produced one.
pub fn fallback_roast(language: Language) -> Roast {
    match language {
        Language::Hindi => Roast::new(fallback_label(language), "AI bhi thak gaya bc"),
        Language::English => Roast::new(fallback_label(language), "Even AI gave up on you"),
    }
}

/// Prompt sent for a topic.
pub fn build_prompt(topic: &str, language: Language) -> String {
    let (persona, style) = match language {
        Language::Hindi => (
            "Tu ek savage roaster hai. Hinglish mein likh.",
            "relatable, spicy",
        ),
        Language::English => ("You're a savage roaster.", "relatable, edgy"),
    };
    format!(
        "{persona}

RULES:
- LABEL: 1-2 funny words
- ROAST: exactly 15-20 words, {style}

FORMAT:
LABEL: [title]
ROAST: [15-20 word roast]

Topic: {topic}"
    )
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    if !head.eq_ignore_ascii_case(key) {
        return None;
    }
    let rest = &line[key.len()..];
    Some(rest.trim().trim_matches(|c| matches!(c, '"' | '\'' | '*')))
}

/// Pulls the `LABEL:` and `ROAST:` lines out of a model reply.
///
/// A missing label becomes the fallback label; a missing or very short roast
/// becomes the first 100 characters of the reply with `*` removed.
pub fn parse_reply(text: &str, language: Language) -> Roast {
    let text = text.trim();
    let mut label = "";
    let mut body = "";
    for line in text.lines() {
        if let Some(value) = field_value(line, "LABEL:") {
            label = value;
        } else if let Some(value) = field_value(line, "ROAST:") {
            body = value;
        }
    }

    let label = if label.is_empty() {
        fallback_label(language).to_string()
    } else {
        label.to_string()
    };
    let body = if body.chars().count() < 10 {
        text.chars().take(100).filter(|c| *c != '*').collect()
    } else {
        body.to_string()
    };
    Roast { label, body }
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for POST /chat/completions
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the roast-writing models.
#[derive(Clone, Debug)]
pub struct RoastClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    models: Vec<String>,
}

impl RoastClient {
    /// Builds a client that tries `models` in order against `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        models: Vec<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(LLM_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
            models,
        })
    }

    /// Returns a roast for `topic`, never failing: when every model errors
    /// the fallback roast comes back instead.
    pub async fn generate(&self, topic: &str, language: Language) -> Roast {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("No API key configured, using the fallback roast");
            return fallback_roast(language);
        };

        let prompt = build_prompt(topic, language);
        for model in &self.models {
            match self.complete(api_key, model, &prompt).await {
                Ok(text) => {
                    debug!("Model {model} answered: {text}");
                    return parse_reply(&text, language);
                }
                Err(err) => warn!("Model {model} failed: {err:#}"),
            }
        }
        fallback_roast(language)
    }

    async fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 1.2,
            max_tokens: 80,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Request to chat completions failed")?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .context("Failed reading chat completions body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "Chat completions error {status}: {}",
                String::from_utf8_lossy(&bytes)
            ));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_slice(&bytes).context("Failed to parse chat completions JSON")?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(anyhow!("Chat completions returned no content"));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::{Value, json};

    #[test]
    fn language_param_mapping() {
        assert_eq!(Language::from_param(None), Language::Hindi);
        assert_eq!(Language::from_param(Some("hindi")), Language::Hindi);
        assert_eq!(Language::from_param(Some("HINDI")), Language::Hindi);
        assert_eq!(Language::from_param(Some("english")), Language::English);
        assert_eq!(Language::from_param(Some("klingon")), Language::English);
        assert_eq!(Language::English.to_string(), "english");
    }

    #[test]
    fn parses_label_and_roast_lines() {
        let reply = "Here you go!\nLABEL: **Gym Tourist**\nroast: \"Tu gym sirf selfie lene jaata hai, \
                     dumbbell ko chhoone se pehle hi thak jaata hai bhai\"";
        let roast = parse_reply(reply, Language::Hindi);
        assert_eq!(roast.label, "Gym Tourist");
        assert_eq!(
            roast.body,
            "Tu gym sirf selfie lene jaata hai, dumbbell ko chhoone se pehle hi thak jaata hai bhai"
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        let reply = "*Just* a rambling answer with no format at all";
        let roast = parse_reply(reply, Language::English);
        assert_eq!(roast.label, "Certified Clown");
        assert_eq!(roast.body, "Just a rambling answer with no format at all");

        let short = parse_reply("LABEL: Lazy\nROAST: meh", Language::Hindi);
        assert_eq!(short.label, "Lazy");
        assert_eq!(short.body, "LABEL: Lazy\nROAST: meh");
    }

    #[test]
    fn long_unformatted_reply_is_truncated() {
        let reply = "x".repeat(250);
        let roast = parse_reply(&reply, Language::Hindi);
        assert_eq!(roast.body.chars().count(), 100);
        assert_eq!(roast.label, "Certified Nalla");
    }

    #[test]
    fn prompt_mentions_topic_and_format() {
        let prompt = build_prompt("Engineers", Language::English);
        assert!(prompt.contains("Topic: Engineers"));
        assert!(prompt.contains("LABEL:"));
        assert!(prompt.contains("ROAST:"));
    }

    #[tokio::test]
    async fn no_api_key_uses_fallback() {
        let client = RoastClient::new("http://127.0.0.1:9/", None, vec!["model".to_string()])
            .expect("client");
        assert_eq!(
            client.generate("Startups", Language::English).await,
            fallback_roast(Language::English)
        );
    }

    #[tokio::test]
    async fn unreachable_backend_uses_fallback() {
        let client = RoastClient::new(
            "http://127.0.0.1:9/v1/chat/completions",
            Some("key".to_string()),
            vec!["a".to_string(), "b".to_string()],
        )
        .expect("client");
        assert_eq!(
            client.generate("Cricket fans", Language::Hindi).await,
            fallback_roast(Language::Hindi)
        );
    }

    /// Serves a chat completions endpoint where the model named `broken`
    /// fails and every other model answers.
    async fn mock_backend(calls: Arc<AtomicUsize>) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            axum::routing::post(move |Json(request): Json<Value>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if request["model"] == "broken" {
                        return (StatusCode::SERVICE_UNAVAILABLE, "overloaded").into_response();
                    }
                    Json(json!({
                        "choices": [{
                            "message": {
                                "role": "assistant",
                                "content": "LABEL: Deploy Hero\nROAST: Ships on Friday evening and \
                                            then blames the intern for the weekend outage again",
                            }
                        }]
                    }))
                    .into_response()
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock");
        let addr = listener.local_addr().expect("mock address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/v1/chat/completions")
    }

    #[tokio::test]
    async fn falls_through_to_next_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let endpoint = mock_backend(calls.clone()).await;
        let client = RoastClient::new(
            endpoint,
            Some("key".to_string()),
            vec!["broken".to_string(), "working".to_string(), "unused".to_string()],
        )
        .expect("client");

        let roast = client.generate("Engineers", Language::English).await;
        assert_eq!(roast.label, "Deploy Hero");
        assert!(roast.body.starts_with("Ships on Friday"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn all_models_failing_uses_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let endpoint = mock_backend(calls.clone()).await;
        let client = RoastClient::new(
            endpoint,
            Some("key".to_string()),
            vec!["broken".to_string(), "broken".to_string()],
        )
        .expect("client");

        assert_eq!(
            client.generate("Influencers", Language::Hindi).await,
            fallback_roast(Language::Hindi)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
