//! Dashboard: live sidebar and score ticker
//!
//! Refreshes the sidebar from the content endpoint and the ticker from the
//! recent-events endpoint, each on its own period, printing a panel every
//! time it changes. Failed refreshes show a placeholder and never stop the
//! loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::info;

use sportswatch::api::SportsClient;
use sportswatch::config::{AppConfig, CONFIG_PATH};
use sportswatch::reporter;
use sportswatch::scheduler::{RefreshTask, Scheduler, TaskOutcome, shutdown_signal};
use sportswatch::state::DashboardState;
use sportswatch::types::Panel;

#[derive(Parser)]
#[command(name = "dashboard", about = "Live sports sidebar and score ticker")]
struct Args {
    /// Path to the config file (defaults apply if it does not exist)
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Refresh each panel once and exit
    #[arg(long)]
    once: bool,
}

struct DashboardApp {
    client: SportsClient,
    state: DashboardState,
}

#[async_trait]
impl RefreshTask<Panel> for DashboardApp {
    async fn run(&mut self, panel: Panel) -> TaskOutcome {
        let outcome = self.state.refresh(panel, &self.client).await;
        reporter::report_panel(panel, self.state.text(panel));
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

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config)?;
    let settings = &config.settings;
    let client = SportsClient::from_config(&config).context("failed to build HTTP client")?;

    info!(
        "Starting dashboard: page={} sidebar={}s ticker={}s",
        config.endpoints.page_url, settings.sidebar_interval_secs, settings.ticker_interval_secs,
    );

    let state = DashboardState::new(settings.ticker_max_items);
    reporter::report_panel(Panel::Ticker, state.ticker());

    let mut app = DashboardApp { client, state };
    let mut scheduler = Scheduler::new();
    scheduler.register(Panel::Sidebar, settings.sidebar_interval());
    scheduler.register(Panel::Ticker, settings.ticker_interval());

    if args.once {
        scheduler.run_once(&mut app).await;
    } else {
        info!("Press Ctrl+C to stop.");
        scheduler.run(&mut app, shutdown_signal()).await;
    }

    for task in scheduler.tasks() {
        info!(
            "{}: {} refresh(es), last {:?}",
            task.key(),
            task.runs(),
            task.last_outcome()
        );
    }
    Ok(())
}
