use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::scheduler::MAX_PERIOD;
use crate::{PAGE_URL, SCOREBOARD_URL, SIDEBAR_URL, SUMMARY_URL, TICKER_URL};

/// Default config file path.
pub const CONFIG_PATH: &str = "config.toml";

/// Top-level application config deserialized from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Data endpoints polled by the two apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_scoreboard_url")]
    pub scoreboard_url: String,
    #[serde(default = "default_summary_url")]
    pub summary_url: String,
    #[serde(default = "default_sidebar_url")]
    pub sidebar_url: String,
    #[serde(default = "default_ticker_url")]
    pub ticker_url: String,
    /// Page the dashboard shows next to its panels.
    #[serde(default = "default_page_url")]
    pub page_url: String,
}

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Sidebar refresh period in seconds.
    #[serde(default = "default_sidebar_interval")]
    pub sidebar_interval_secs: u64,
    /// Ticker refresh period in seconds.
    #[serde(default = "default_ticker_interval")]
    pub ticker_interval_secs: u64,
    /// Maximum number of results shown on the ticker.
    #[serde(default = "default_ticker_max_items")]
    pub ticker_max_items: usize,
    /// Tracker render period in seconds.
    #[serde(default = "default_render_interval")]
    pub render_interval_secs: u64,
}

fn default_scoreboard_url() -> String {
    SCOREBOARD_URL.to_string()
}

fn default_summary_url() -> String {
    SUMMARY_URL.to_string()
}

fn default_sidebar_url() -> String {
    SIDEBAR_URL.to_string()
}

fn default_ticker_url() -> String {
    TICKER_URL.to_string()
}

fn default_page_url() -> String {
    PAGE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    5
}

fn default_sidebar_interval() -> u64 {
    30
}

fn default_ticker_interval() -> u64 {
    15
}

fn default_ticker_max_items() -> usize {
    5
}

fn default_render_interval() -> u64 {
    30
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            scoreboard_url: default_scoreboard_url(),
            summary_url: default_summary_url(),
            sidebar_url: default_sidebar_url(),
            ticker_url: default_ticker_url(),
            page_url: default_page_url(),
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            sidebar_interval_secs: default_sidebar_interval(),
            ticker_interval_secs: default_ticker_interval(),
            ticker_max_items: default_ticker_max_items(),
            render_interval_secs: default_render_interval(),
        }
    }
}

impl SettingsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sidebar_interval(&self) -> Duration {
        Duration::from_secs(self.sidebar_interval_secs)
    }

    pub fn ticker_interval(&self) -> Duration {
        Duration::from_secs(self.ticker_interval_secs)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_secs(self.render_interval_secs)
    }
}

impl AppConfig {
    /// Load config from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject unusable endpoint URLs, periods outside 1s..=1 day and an
    /// empty ticker up front.
    pub fn validate(&self) -> Result<()> {
        let e = &self.endpoints;
        for (name, value) in [
            ("scoreboard_url", &e.scoreboard_url),
            ("summary_url", &e.summary_url),
            ("sidebar_url", &e.sidebar_url),
            ("ticker_url", &e.ticker_url),
            ("page_url", &e.page_url),
        ] {
            Url::parse(value).with_context(|| format!("endpoints.{name} is not a valid URL"))?;
        }

        let s = &self.settings;
        for (name, value) in [
            ("request_timeout_secs", s.request_timeout_secs),
            ("sidebar_interval_secs", s.sidebar_interval_secs),
            ("ticker_interval_secs", s.ticker_interval_secs),
            ("render_interval_secs", s.render_interval_secs),
        ] {
            if value == 0 {
                anyhow::bail!("settings.{name} must be positive");
            }
            if value > MAX_PERIOD.as_secs() {
                anyhow::bail!(
                    "settings.{name} must be at most {} seconds",
                    MAX_PERIOD.as_secs()
                );
            }
        }
        if s.ticker_max_items == 0 {
            anyhow::bail!("settings.ticker_max_items must be positive");
        }
        Ok(())
    }
}
