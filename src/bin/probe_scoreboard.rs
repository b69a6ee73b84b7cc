//! Probe: ESPN MLB scoreboard
//!
//! Hits the configured scoreboard URL and documents:
//! - Response status, latency and top-level keys
//! - Event count and a sample event
//! - Which events survive typed parsing (games without a competition drop out)

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde_json::Value;

use sportswatch::config::{AppConfig, CONFIG_PATH};
use sportswatch::espn::{self, Scoreboard};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_or_default(Path::new(CONFIG_PATH))?;
    let url = &config.endpoints.scoreboard_url;
    let client = reqwest::Client::builder()
        .timeout(config.settings.request_timeout())
        .build()?;

    println!("=== Probe: Scoreboard ===");
    println!("URL: {url}");
    println!();

    // 1. Raw response
    println!("--- 1. Raw response ---");
    let start = Instant::now();
    let resp = client.get(url).send().await?;
    let latency = start.elapsed();
    let status = resp.status();
    let body: Value = resp.json().await?;
    println!("Status: {status}");
    println!("Latency: {latency:?}");
    if let Some(obj) = body.as_object() {
        println!("Top-level keys:");
        for key in obj.keys() {
            println!("  - {key}");
        }
    }
    println!();

    // 2. Events
    println!("--- 2. Events ---");
    match body.get("events").and_then(|v| v.as_array()) {
        Some(arr) => {
            println!("Event count: {}", arr.len());
            if let Some(first) = arr.first() {
                let id = first.get("id").cloned().unwrap_or(Value::Null);
                let name = first.get("name").and_then(|v| v.as_str()).unwrap_or("?");
                println!("First event: id={id} name={name}");
                let competitors = first
                    .pointer("/competitions/0/competitors")
                    .and_then(|v| v.as_array())
                    .map(|a| a.len())
                    .unwrap_or(0);
                println!("Competitors in first competition: {competitors}");
            }
        }
        None => println!("No events array in response"),
    }
    println!();

    // 3. Typed parse
    println!("--- 3. Typed parse ---");
    let board: Scoreboard = serde_json::from_value(body)?;
    let raw_count = board.events.len();
    let events = espn::events_from_scoreboard(board);
    println!("Parsed {} of {raw_count} events", events.len());
    for event in &events {
        println!("  {}  {}  ({})", event.id, event.name, event.teams.join(", "));
    }
    println!();

    println!("=== Probe Complete ===");
    Ok(())
}
