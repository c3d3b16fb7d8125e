//! Promote today's scheduled entry in the daily topic file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use roaster::topics::DailyTopicFile;

#[derive(Parser, Debug)]
struct Args {
    #[clap(
        long,
        short,
        default_value = "daily_topic.json",
        env = "ROASTER_DAILY_TOPIC_PATH"
    )]
    /// Daily topic JSON file. Env: ROASTER_DAILY_TOPIC_PATH
    path: PathBuf,

    #[clap(long)]
    /// Date to promote, `YYYY-MM-DD`. Defaults to today.
    date: Option<NaiveDate>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());

    let mut file = DailyTopicFile::read(&args.path)
        .await
        .with_context(|| format!("reading {}", args.path.display()))?;

    if !file.promote_upcoming(today) {
        println!("No topic scheduled for {}, leaving {} as is.", today, args.path.display());
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&file)?;
    tokio::fs::write(&args.path, json)
        .await
        .with_context(|| format!("writing {}", args.path.display()))?;

    if let Some(topic) = file.english.as_ref() {
        println!("Promoted {} for {}.", topic.topic, today);
    } else {
        println!("Promoted the entry for {}.", today);
    }
    println!("{} upcoming entries left.", file.upcoming.len());
    Ok(())
}
