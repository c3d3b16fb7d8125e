use clap::Parser;
use roaster::config::{RoasterConfig, setup_logging};
use roaster::db::entities::stats;
use sea_orm_migration::MigratorTrait;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = roaster::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let db = match roaster::db::connect_db(&cli.database_path).await {
        Ok(db) => db,
        Err(err) => {
            error!("Database connection error: {}", err);
            return;
        }
    };

    if let Err(err) = roaster::db::migrations::Migrator::up(&db, None).await {
        error!("Database migration error: {}", err);
        return;
    }

    if let Err(err) = stats::ensure_counter(&db, cli.counter_seed).await {
        error!("Failed to seed roast counter: {}", err);
        return;
    }

    let config = RoasterConfig::from(&cli);
    if let Err(err) =
        roaster::web::setup_server(&cli.listen_address, cli.port, &config, db).await
    {
        error!("Application error: {}", err);
    }
}
