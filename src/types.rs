use std::fmt;

use serde::{Deserialize, Serialize};

/// A game from the scoreboard listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Competitor team display names of the first competition.
    pub teams: Vec<String>,
}

/// A user-defined watch on one player's statistic in one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingCard {
    pub event_id: String,
    pub event_name: String,
    pub participant: String,
    /// Statistic label, matched case-sensitively against the box score.
    pub stat: String,
    pub target: u32,
}

/// Result of resolving one statistic in a box score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLookup {
    Found(i64),
    /// No athlete line with that display name.
    MissingParticipant,
    /// Athlete found, but its group has no such label.
    MissingLabel,
}

impl StatLookup {
    /// Value shown on a card; anything not found counts as 0.
    pub fn value(self) -> i64 {
        match self {
            StatLookup::Found(v) => v,
            StatLookup::MissingParticipant | StatLookup::MissingLabel => 0,
        }
    }
}

/// Background colour of a rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    LightGreen,
    LightCoral,
}

impl CardColor {
    pub fn as_str(self) -> &'static str {
        match self {
            CardColor::LightGreen => "lightgreen",
            CardColor::LightCoral => "lightcoral",
        }
    }
}

/// What one render pass found for a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardOutcome {
    Value {
        value: i64,
        met: bool,
        color: CardColor,
    },
    Error {
        message: String,
    },
}

/// A card together with its freshly resolved outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: TrackingCard,
    #[serde(flatten)]
    pub outcome: CardOutcome,
}

impl CardView {
    pub fn is_met(&self) -> bool {
        matches!(self.outcome, CardOutcome::Value { met: true, .. })
    }
}

/// One render pass of the tracker, emitted as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerPass {
    pub timestamp: String,
    pub cards: Vec<CardView>,
}

/// One past result shown on the ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerItem {
    pub description: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

/// Content shown in the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarContent {
    pub title: String,
    pub body: String,
}

/// Dashboard panels that refresh on their own schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Sidebar,
    Ticker,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Sidebar => f.write_str("sidebar"),
            Panel::Ticker => f.write_str("ticker"),
        }
    }
}
