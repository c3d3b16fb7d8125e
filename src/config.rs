//! Config handling

use std::path::PathBuf;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::constants::{
    DEFAULT_COUNTER_SEED, DEFAULT_FONT_CANDIDATES, DEFAULT_LLM_ENDPOINT, DEFAULT_MODELS,
};

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("sqlx", LevelFilter::Warn)
            .with_module_level("sea_orm", LevelFilter::Warn)
            .with_module_level("sea_orm_migration", LevelFilter::Warn)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Everything the web app needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct RoasterConfig {
    /// Directory of base images.
    pub meme_dir: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Daily topic JSON file.
    pub daily_topic_path: PathBuf,
    /// Chat completions URL.
    pub llm_endpoint: String,
    /// Bearer token for the chat completions URL.
    pub api_key: Option<String>,
    /// Models to try, in order.
    pub models: Vec<String>,
    /// Fonts to try, in order.
    pub fonts: Vec<PathBuf>,
    /// Counter value for a fresh database, also reported when the counter
    /// can't be read.
    pub counter_seed: i64,
}

impl Default for RoasterConfig {
    fn default() -> Self {
        Self {
            meme_dir: PathBuf::from("memes"),
            static_dir: PathBuf::from("static"),
            daily_topic_path: PathBuf::from("daily_topic.json"),
            llm_endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            api_key: None,
            models: DEFAULT_MODELS.iter().map(|model| model.to_string()).collect(),
            fonts: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            counter_seed: DEFAULT_COUNTER_SEED,
        }
    }
}

impl From<&CliOptions> for RoasterConfig {
    fn from(cli: &CliOptions) -> Self {
        let defaults = Self::default();
        let models = if cli.models.is_empty() {
            defaults.models
        } else {
            cli.models.clone()
        };
        let fonts = if cli.fonts.is_empty() {
            defaults.fonts
        } else {
            cli.fonts.clone()
        };
        Self {
            meme_dir: cli.meme_dir.clone(),
            static_dir: cli.static_dir.clone(),
            daily_topic_path: cli.daily_topic_path.clone(),
            llm_endpoint: cli.llm_endpoint.clone(),
            api_key: cli
                .groq_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            models,
            fonts,
            counter_seed: cli.counter_seed,
        }
    }
}
