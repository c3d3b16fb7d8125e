//! Shared constants/defaults for things
//!

/// Fonts tried, in order, when none are configured.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "arial.ttf",
];

/// Chat completion models tried, in order, when none are configured.
pub const DEFAULT_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "qwen/qwen-2.5-72b-instruct",
    "meta-llama/llama-3.1-70b-versatile",
];

/// OpenAI-compatible chat completions endpoint (Groq).
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Starting value of the roast counter on a fresh database.
pub const DEFAULT_COUNTER_SEED: i64 = 47892;

/// JPEG quality of the captioned image.
pub const JPEG_QUALITY: u8 = 95;

/// Seconds before a chat completion request is abandoned.
pub const LLM_TIMEOUT_SECONDS: u64 = 30;

/// Longest topic we store.
pub const MAX_TOPIC_CHARS: usize = 255;

/// Longest label we store.
pub const MAX_LABEL_CHARS: usize = 100;

/// File extensions the meme pool accepts.
pub const MEME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
