//! Tracker: MLB real-time stat tracker
//!
//! Lists today's games and their players, and watches player statistics
//! against targets. Each render pass re-fetches every card's statistic and
//! prints the cards as one JSON line (or as text with `--text`).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use sportswatch::api::{SportsClient, StatSource};
use sportswatch::config::{AppConfig, CONFIG_PATH};
use sportswatch::reporter;
use sportswatch::scheduler::{RefreshTask, Scheduler, TaskOutcome, shutdown_signal};
use sportswatch::state::{CardRequest, TrackerState, pass_outcome, resolve_card};

#[derive(Parser)]
#[command(name = "tracker", about = "MLB real-time stat tracker")]
struct Cli {
    /// Path to the config file (defaults apply if it does not exist)
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List today's games
    Games,

    /// List the players in a game's box score
    Players {
        /// Game id as printed by `games`
        #[arg(long)]
        event: String,
    },

    /// Watch player statistics against targets
    Track {
        /// Card to add, e.g. `401569123:Aaron Judge:Hits:2` (repeatable, kept in order)
        #[arg(long = "card", required = true, value_name = "EVENT_ID:PLAYER:STAT:TARGET")]
        cards: Vec<CardRequest>,

        /// Render once and exit
        #[arg(long)]
        once: bool,

        /// Print cards as text instead of JSON lines
        #[arg(long)]
        text: bool,
    },
}

/// Scheduler key for the single render task.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Render;

struct TrackerApp {
    client: SportsClient,
    state: TrackerState,
    text: bool,
}

#[async_trait]
impl RefreshTask<Render> for TrackerApp {
    async fn run(&mut self, _render: Render) -> TaskOutcome {
        let views = self.state.refresh(&self.client).await;
        let outcome = pass_outcome(&views);
        if self.text {
            reporter::report_pass_text(&views);
        } else {
            reporter::report_pass(views);
        }
        outcome
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;
    let client = SportsClient::from_config(&config).context("failed to build HTTP client")?;

    match cli.command {
        Command::Games => {
            let events = client
                .fetch_events()
                .await
                .context("failed to fetch today's games")?;
            if events.is_empty() {
                warn!("No games on today's scoreboard");
            }
            reporter::report_events(&events);
        }
        Command::Players { event } => {
            let names = client
                .fetch_participants(&event)
                .await
                .with_context(|| format!("failed to fetch players for game {event}"))?;
            if names.is_empty() {
                warn!("Game {event} has no box score yet");
            }
            reporter::report_names(&names);
        }
        Command::Track { cards, once, text } => {
            track(client, &config, &cards, once, text).await?;
        }
    }

    Ok(())
}

async fn track(
    client: SportsClient,
    config: &AppConfig,
    requests: &[CardRequest],
    once: bool,
    text: bool,
) -> Result<()> {
    info!("Fetching today's games...");
    let events = match client.fetch_events().await {
        Ok(events) => Some(events),
        Err(e) => {
            warn!("Failed to fetch today's games, cards are added unchecked: {e}");
            None
        }
    };

    let mut state = TrackerState::new();
    for request in requests {
        match resolve_card(&client, events.as_deref(), request).await {
            Ok(card) => state.add_card(card),
            Err(e) => warn!(
                "Skipping card {}:{}:{}: {e:#}",
                request.event_id, request.participant, request.stat
            ),
        }
    }
    if state.is_empty() {
        bail!("no valid cards to track");
    }

    let period = config.settings.render_interval();
    info!("Tracking {} card(s), rendering every {period:?}", state.len());

    let mut app = TrackerApp {
        client,
        state,
        text,
    };
    let mut scheduler = Scheduler::new();
    scheduler.register(Render, period);

    if once {
        scheduler.run_once(&mut app).await;
    } else {
        info!("Press Ctrl+C to stop.");
        scheduler.run(&mut app, shutdown_signal()).await;
    }
    Ok(())
}
