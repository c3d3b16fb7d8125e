//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

use crate::constants::{DEFAULT_COUNTER_SEED, DEFAULT_LLM_ENDPOINT};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "ROASTER_DEBUG")]
    /// Enable debug logging. Env: ROASTER_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "ROASTER_PORT")]
    /// http listener, defaults to `5000`.
    /// Env: ROASTER_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "ROASTER_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: ROASTER_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(
        long,
        short,
        default_value = "roaster.sqlite",
        env = "ROASTER_DATABASE_PATH"
    )]
    /// Path to the database file, eg `/data/roaster.sqlite`.
    /// Env: ROASTER_DATABASE_PATH
    pub database_path: String,

    #[clap(long, short, default_value = "memes", env = "ROASTER_MEME_DIR")]
    /// Directory of base images. Env: ROASTER_MEME_DIR
    pub meme_dir: PathBuf,

    #[clap(long, default_value = "static", env = "ROASTER_STATIC_DIR")]
    /// Directory served under `/static`. Env: ROASTER_STATIC_DIR
    pub static_dir: PathBuf,

    #[clap(long, default_value = "daily_topic.json", env = "ROASTER_DAILY_TOPIC_PATH")]
    /// Daily topic JSON file. Env: ROASTER_DAILY_TOPIC_PATH
    pub daily_topic_path: PathBuf,

    #[clap(long, env = "GROQ_API_KEY", hide_env_values = true)]
    /// API key for the chat completions endpoint. Without one every roast is
    /// the fallback. Env: GROQ_API_KEY
    pub groq_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_LLM_ENDPOINT, env = "ROASTER_LLM_ENDPOINT")]
    /// OpenAI-compatible chat completions URL. Env: ROASTER_LLM_ENDPOINT
    pub llm_endpoint: String,

    #[clap(long, value_delimiter = ',', env = "ROASTER_MODELS")]
    /// Models to try in order, comma separated. Env: ROASTER_MODELS
    pub models: Vec<String>,

    #[clap(long, value_delimiter = ',', env = "ROASTER_FONTS")]
    /// Font files to try in order, comma separated. Env: ROASTER_FONTS
    pub fonts: Vec<PathBuf>,

    #[clap(long, default_value_t = DEFAULT_COUNTER_SEED, env = "ROASTER_COUNTER_SEED")]
    /// Initial roast counter for a fresh database. Env: ROASTER_COUNTER_SEED
    pub counter_seed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let cli = CliOptions::try_parse_from(["roaster"]).expect("parse defaults");
        assert_eq!(cli.port.get(), 5000);
        assert_eq!(cli.meme_dir, PathBuf::from("memes"));
        assert_eq!(cli.counter_seed, DEFAULT_COUNTER_SEED);
        assert!(cli.models.is_empty());
    }

    #[test]
    fn lists_split_on_commas() {
        let cli = CliOptions::try_parse_from([
            "roaster",
            "--models",
            "model-a,model-b",
            "--fonts",
            "a.ttf,b.ttf",
        ])
        .expect("parse lists");
        assert_eq!(cli.models, vec!["model-a", "model-b"]);
        assert_eq!(cli.fonts, vec![PathBuf::from("a.ttf"), PathBuf::from("b.ttf")]);
    }
}
