use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use tracing::{debug, warn};

use crate::api::{DashboardSource, StatSource};
use crate::engine::{self, TICKER_LOADING};
use crate::scheduler::TaskOutcome;
use crate::types::{CardOutcome, CardView, Event, Panel, StatLookup, TrackingCard};

/// A card as requested on the command line: `EVENT_ID:PLAYER:STAT:TARGET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub event_id: String,
    pub participant: String,
    pub stat: String,
    pub target: u32,
}

impl FromStr for CardRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, target) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected EVENT_ID:PLAYER:STAT:TARGET, got {s:?}"))?;
        let mut parts = rest.splitn(3, ':');
        let (Some(event_id), Some(participant), Some(stat)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected EVENT_ID:PLAYER:STAT:TARGET, got {s:?}"));
        };
        if event_id.is_empty() || participant.is_empty() || stat.is_empty() {
            return Err(format!("empty field in card {s:?}"));
        }
        let target = target
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("target must be a non-negative integer, got {target:?}"))?;
        Ok(CardRequest {
            event_id: event_id.to_string(),
            participant: participant.to_string(),
            stat: stat.to_string(),
            target,
        })
    }
}

/// Turn a request into a card, checking the game and player against the
/// listings. Names must match exactly.
///
/// `events` is `None` when today's games could not be fetched. A listing
/// that fails to load does not reject the card: it is added unchecked and
/// its render passes show the fetch error inline. Only a real mismatch
/// against a listing that did load is an error.
pub async fn resolve_card<S: StatSource + ?Sized>(
    source: &S,
    events: Option<&[Event]>,
    request: &CardRequest,
) -> Result<TrackingCard> {
    let unchecked = |event_name: &str| TrackingCard {
        event_id: request.event_id.clone(),
        event_name: event_name.to_string(),
        participant: request.participant.clone(),
        stat: request.stat.clone(),
        target: request.target,
    };

    let Some(events) = events else {
        warn!(
            "Game list unavailable, adding {}:{} unchecked",
            request.event_id, request.participant
        );
        return Ok(unchecked(&request.event_id));
    };
    let event = events
        .iter()
        .find(|e| e.id == request.event_id)
        .ok_or_else(|| anyhow!("unknown game id {:?}", request.event_id))?;

    match source.fetch_participants(&event.id).await {
        Ok(players) if players.iter().any(|p| *p == request.participant) => {}
        Ok(_) => bail!(
            "{:?} is not in the box score of {}",
            request.participant,
            event.name
        ),
        Err(e) => warn!(
            "Could not fetch players for {}, adding {:?} unchecked: {e}",
            event.name, request.participant
        ),
    }
    Ok(unchecked(&event.name))
}

/// Append-only list of tracking cards.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    cards: Vec<TrackingCard>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: TrackingCard) {
        debug!(
            "Tracking {} {} >= {} in {}",
            card.participant, card.stat, card.target, card.event_name
        );
        self.cards.push(card);
    }

    /// Cards in insertion order.
    pub fn cards(&self) -> &[TrackingCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Re-resolve every card's statistic. A failing card gets an inline
    /// error and the pass moves on to the next one.
    pub async fn refresh<S: StatSource + ?Sized>(&self, source: &S) -> Vec<CardView> {
        let mut views = Vec::with_capacity(self.cards.len());
        for card in &self.cards {
            let outcome = match source
                .fetch_stat(&card.event_id, &card.participant, &card.stat)
                .await
            {
                Ok(lookup) => {
                    match lookup {
                        StatLookup::Found(v) => {
                            debug!("[{}] {} {} = {v}", card.event_id, card.participant, card.stat);
                        }
                        StatLookup::MissingParticipant => {
                            warn!(
                                "[{}] {:?} has no box score line yet, showing 0",
                                card.event_id, card.participant
                            );
                        }
                        StatLookup::MissingLabel => {
                            warn!(
                                "[{}] no statistic labelled {:?} for {:?}, showing 0",
                                card.event_id, card.stat, card.participant
                            );
                        }
                    }
                    engine::evaluate_card(card, lookup)
                }
                Err(e) => {
                    warn!(
                        "[{}] failed to fetch {} for {}: {e}",
                        card.event_id, card.stat, card.participant
                    );
                    engine::card_error(card, &e)
                }
            };
            views.push(CardView {
                card: card.clone(),
                outcome,
            });
        }
        views
    }
}

/// Outcome of a tracker pass: data only if no card failed.
pub fn pass_outcome(views: &[CardView]) -> TaskOutcome {
    if views
        .iter()
        .any(|v| matches!(v.outcome, CardOutcome::Error { .. }))
    {
        TaskOutcome::Error
    } else {
        TaskOutcome::Data
    }
}

/// Texts currently shown by the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    sidebar: String,
    ticker: String,
    ticker_max_items: usize,
}

impl DashboardState {
    pub fn new(ticker_max_items: usize) -> Self {
        Self {
            sidebar: String::new(),
            ticker: TICKER_LOADING.to_string(),
            ticker_max_items,
        }
    }

    pub fn sidebar(&self) -> &str {
        &self.sidebar
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn text(&self, panel: Panel) -> &str {
        match panel {
            Panel::Sidebar => &self.sidebar,
            Panel::Ticker => &self.ticker,
        }
    }

    /// Fetch one panel and overwrite its text, with an error placeholder on
    /// failure. The text is only replaced once the fetch has finished.
    pub async fn refresh<S: DashboardSource + ?Sized>(
        &mut self,
        panel: Panel,
        source: &S,
    ) -> TaskOutcome {
        let (text, outcome) = match panel {
            Panel::Sidebar => match source.fetch_sidebar().await {
                Ok(content) => (engine::format_sidebar(&content), TaskOutcome::Data),
                Err(e) => {
                    warn!("Sidebar refresh failed: {e}");
                    (engine::sidebar_error(&e), TaskOutcome::Error)
                }
            },
            Panel::Ticker => match source.fetch_recent_events().await {
                Ok(items) => {
                    debug!("Ticker received {} results", items.len());
                    (
                        engine::format_ticker(&items, self.ticker_max_items),
                        TaskOutcome::Data,
                    )
                }
                Err(e) => {
                    warn!("Ticker refresh failed: {e}");
                    (engine::ticker_error(&e), TaskOutcome::Error)
                }
            },
        };
        match panel {
            Panel::Sidebar => self.sidebar = text,
            Panel::Ticker => self.ticker = text,
        }
        outcome
    }
}
