use std::fmt::Display;

use crate::types::{
    CardColor, CardOutcome, CardView, SidebarContent, StatLookup, TickerItem, TrackingCard,
};

/// Separator between ticker entries.
pub const TICKER_SEPARATOR: &str = " | ";

/// Ticker text shown before the first refresh completes.
pub const TICKER_LOADING: &str = "Loading sports scores...";

/// Ticker text when the feed has no results.
pub const TICKER_EMPTY: &str = "No recent results";

/// Placeholder for a score the feed did not provide.
const MISSING_SCORE: &str = "?";

/// Whether a statistic value reaches its target. Target 0 is always met.
pub fn target_met(value: i64, target: u32) -> bool {
    value >= i64::from(target)
}

pub fn card_color(met: bool) -> CardColor {
    if met {
        CardColor::LightGreen
    } else {
        CardColor::LightCoral
    }
}

/// Outcome of a card given its resolved statistic.
pub fn evaluate_card(card: &TrackingCard, lookup: StatLookup) -> CardOutcome {
    let value = lookup.value();
    let met = target_met(value, card.target);
    CardOutcome::Value {
        value,
        met,
        color: card_color(met),
    }
}

/// Outcome of a card whose statistic could not be fetched.
pub fn card_error(card: &TrackingCard, err: impl Display) -> CardOutcome {
    CardOutcome::Error {
        message: format!(
            "Failed to load {} for {}: {err}",
            card.stat, card.participant
        ),
    }
}

/// Two-line text rendering of a card, as shown on the tracker.
pub fn format_card(view: &CardView) -> String {
    let card = &view.card;
    let header = format!("{} in {}", card.participant, card.event_name);
    match &view.outcome {
        CardOutcome::Value { value, met, color } => {
            let status = if *met { "met" } else { "not met" };
            format!(
                "{header}\n{}: {value} / {} [{status}, {}]",
                card.stat,
                card.target,
                color.as_str()
            )
        }
        CardOutcome::Error { message } => format!("{header}\n{message}"),
    }
}

pub fn format_ticker_item(item: &TickerItem) -> String {
    let score = |s: Option<i64>| s.map_or_else(|| MISSING_SCORE.to_string(), |v| v.to_string());
    format!(
        "{} ({} - {})",
        item.description,
        score(item.home_score),
        score(item.away_score)
    )
}

/// First `max_items` results on one line.
pub fn format_ticker(items: &[TickerItem], max_items: usize) -> String {
    if items.is_empty() {
        return TICKER_EMPTY.to_string();
    }
    items
        .iter()
        .take(max_items)
        .map(format_ticker_item)
        .collect::<Vec<_>>()
        .join(TICKER_SEPARATOR)
}

pub fn ticker_error(err: impl Display) -> String {
    format!("Failed to load sports scores: {err}")
}

pub fn format_sidebar(content: &SidebarContent) -> String {
    format!("Title: {}\n\n{}", content.title, content.body)
}

pub fn sidebar_error(err: impl Display) -> String {
    format!("Failed to load sidebar data: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn make_card(target: u32) -> TrackingCard {
        TrackingCard {
            event_id: "123".to_string(),
            event_name: "Yankees vs Red Sox".to_string(),
            participant: "Aaron Judge".to_string(),
            stat: "Hits".to_string(),
            target,
        }
    }

    fn make_item(n: usize) -> TickerItem {
        TickerItem {
            description: format!("Home{n} vs Away{n}"),
            home_score: Some(n as i64),
            away_score: Some(0),
        }
    }

    #[test]
    fn met_is_inclusive() {
        assert!(target_met(2, 2));
        assert!(target_met(3, 2));
        assert!(!target_met(1, 2));
        assert!(target_met(0, 0));
        assert!(!target_met(-1, 0));
    }

    #[test]
    fn zero_target_met_even_when_missing() {
        let outcome = evaluate_card(&make_card(0), StatLookup::MissingLabel);
        assert_eq!(
            outcome,
            CardOutcome::Value {
                value: 0,
                met: true,
                color: CardColor::LightGreen,
            }
        );
    }

    #[test]
    fn evaluate_card_colors() {
        let met = evaluate_card(&make_card(2), StatLookup::Found(2));
        let not_met = evaluate_card(&make_card(3), StatLookup::Found(2));
        assert!(matches!(met, CardOutcome::Value { met: true, color: CardColor::LightGreen, .. }));
        assert!(matches!(
            not_met,
            CardOutcome::Value { met: false, color: CardColor::LightCoral, .. }
        ));
    }

    #[test]
    fn card_error_message() {
        let err = FetchError::InvalidStat {
            label: "Hits".to_string(),
            value: "--".to_string(),
        };
        let outcome = card_error(&make_card(1), &err);
        assert_eq!(
            outcome,
            CardOutcome::Error {
                message: "Failed to load Hits for Aaron Judge: statistic \"Hits\" has non-integer value \"--\"".to_string(),
            }
        );
    }

    #[test]
    fn format_card_lines() {
        let card = make_card(3);
        let view = CardView {
            outcome: evaluate_card(&card, StatLookup::Found(2)),
            card,
        };
        assert_eq!(
            format_card(&view),
            "Aaron Judge in Yankees vs Red Sox\nHits: 2 / 3 [not met, lightcoral]"
        );
    }

    #[test]
    fn ticker_truncates_to_max_items() {
        let items: Vec<TickerItem> = (1..=8).map(make_item).collect();
        let line = format_ticker(&items, 5);
        assert_eq!(line.matches(TICKER_SEPARATOR).count(), 4);
        assert!(line.starts_with("Home1 vs Away1 (1 - 0) | Home2 vs Away2 (2 - 0)"));
        assert!(line.ends_with("Home5 vs Away5 (5 - 0)"));
        assert!(!line.contains("Home6"));
    }

    #[test]
    fn ticker_short_and_empty() {
        let items: Vec<TickerItem> = (1..=2).map(make_item).collect();
        assert_eq!(
            format_ticker(&items, 5),
            "Home1 vs Away1 (1 - 0) | Home2 vs Away2 (2 - 0)"
        );
        assert_eq!(format_ticker(&[], 5), TICKER_EMPTY);
    }

    #[test]
    fn ticker_missing_score() {
        let item = TickerItem {
            description: "Arsenal vs Chelsea".to_string(),
            home_score: None,
            away_score: Some(1),
        };
        assert_eq!(format_ticker_item(&item), "Arsenal vs Chelsea (? - 1)");
    }

    #[test]
    fn sidebar_text() {
        let content = SidebarContent {
            title: "sunt aut facere".to_string(),
            body: "quia et suscipit".to_string(),
        };
        assert_eq!(
            format_sidebar(&content),
            "Title: sunt aut facere\n\nquia et suscipit"
        );
        assert_eq!(
            sidebar_error("timed out"),
            "Failed to load sidebar data: timed out"
        );
        assert_eq!(ticker_error("boom"), "Failed to load sports scores: boom");
    }
}
