//! Probe: ESPN MLB game summary
//!
//! Fetches one game's summary and prints, per team and statistic group, the
//! short labels and long descriptions a tracking card can use, aligned with
//! the first athlete's values. Handy for finding the exact statistic name.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use sportswatch::api::SportsClient;
use sportswatch::config::{AppConfig, CONFIG_PATH};
use sportswatch::espn;

#[derive(Parser)]
#[command(name = "probe_summary", about = "Show box score statistic labels for a game")]
struct Cli {
    /// Game id from the scoreboard
    #[arg(long)]
    event: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(Path::new(CONFIG_PATH))?;
    let client = SportsClient::from_config(&config)?;

    println!("=== Probe: Summary ===");
    println!("URL: {}", client.summary_url(&cli.event)?);
    println!();

    let start = Instant::now();
    let summary = client.summary(&cli.event).await?;
    println!("Latency: {:?}", start.elapsed());

    let Some(boxscore) = &summary.boxscore else {
        println!("No box score yet (game not started?)");
        return Ok(());
    };

    for (t, team) in boxscore.players.iter().enumerate() {
        println!("\n--- Team block {t} ---");
        for (g, group) in team.statistics.iter().enumerate() {
            println!(
                "Group {g}: {} athletes, {} labels, {} descriptions",
                group.athletes.len(),
                group.labels.len(),
                group.descriptions.len()
            );
            let sample = group.athletes.first().map(|a| a.stats.as_slice()).unwrap_or(&[]);
            for (i, label) in group.labels.iter().enumerate() {
                let description = group.descriptions.get(i).map(String::as_str).unwrap_or("-");
                let value = sample.get(i).map(String::as_str).unwrap_or("-");
                println!("  {label:<8} {description:<24} {value}");
            }
        }
    }

    let names = espn::participants(&summary);
    println!("\n{} participants", names.len());

    println!("\n=== Probe Complete ===");
    Ok(())
}
