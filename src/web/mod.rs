//! HTTP surface

use std::num::NonZeroU16;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::config::RoasterConfig;
use crate::db::entities::stats;
use crate::fonts::CaptionFont;
use crate::memes::MemePool;
use crate::roast::RoastClient;

mod api;
pub(crate) mod prelude;
mod roast;
mod views;

use api::{daily_topic_handler, health_handler, stats_handler, trending_handler};
use roast::roast_handler;
use views::root_handler;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    db: DatabaseConnection,
    memes: MemePool,
    roaster: Arc<RoastClient>,
    font: Arc<CaptionFont>,
    daily_topic_path: PathBuf,
    counter_seed: i64,
}

impl AppState {
    fn new(config: &RoasterConfig, db: DatabaseConnection) -> Result<Self, anyhow::Error> {
        let roaster = RoastClient::new(
            config.llm_endpoint.clone(),
            config.api_key.clone(),
            config.models.clone(),
        )?;
        Ok(Self {
            db,
            memes: MemePool::new(config.meme_dir.clone()),
            roaster: Arc::new(roaster),
            font: Arc::new(CaptionFont::load(&config.fonts)),
            daily_topic_path: config.daily_topic_path.clone(),
            counter_seed: config.counter_seed,
        })
    }

    /// The roast counter, or the configured seed when it can't be read.
    async fn total_roasts(&self) -> i64 {
        match stats::total_roasts(&self.db).await {
            Ok(Some(total)) => total,
            Ok(None) => {
                warn!("Roast counter row is missing");
                self.counter_seed
            }
            Err(err) => {
                error!("Failed to read roast counter: {}", err);
                self.counter_seed
            }
        }
    }
}

fn create_router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/roast", get(roast_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/daily-topic", get(daily_topic_handler))
        .route("/api/trending", get(trending_handler))
        .route("/api/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Builds the app from `config` and serves it until ctrl-c.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    config: &RoasterConfig,
    db: DatabaseConnection,
) -> Result<(), anyhow::Error> {
    let app = create_router(&config.static_dir).with_state(AppState::new(config, db)?);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}
