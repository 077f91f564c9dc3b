use std::path::PathBuf;

use anyhow::Result;
use ccr_core::{chrono_tz::Tz, datetime, event, feed_client, filter, report};
use clap::Parser;

/// Extract recent events from the choir calendar feed into a tab-separated
/// report.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// keep events started, created or modified within the last N days
    pub days: i64,
    /// the calendar feed URL
    #[arg(long, env = "CALENDAR_FEED_URL")]
    pub url: String,
    /// where to write the report
    #[arg(long, default_value = "public/pruned.tsv")]
    pub output: PathBuf,
    /// the wall-clock timezone of the feed
    #[arg(long, default_value = "Europe/Warsaw")]
    pub timezone: Tz,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Arguments::parse();
    let data = feed_client::get(&args.url).await?;
    let events = event::parse_events(&data, args.timezone)?;
    log::info!("parsed {} events from the feed", events.len());
    let cutoff = datetime::cutoff(args.days, args.timezone);
    let retained = filter::retain_recent(events, cutoff);
    let rows = report::write_tsv(&args.output, retained)?;
    log::info!("wrote {rows} rows to {}", args.output.display());
    Ok(())
}
