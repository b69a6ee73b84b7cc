//! Dashboard feeds: the sidebar content post and TheSportsDB past events.

use serde::Deserialize;

use crate::types::{SidebarContent, TickerItem};

/// Content post; both fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentPost {
    pub title: String,
    pub body: String,
}

impl From<ContentPost> for SidebarContent {
    fn from(post: ContentPost) -> Self {
        SidebarContent {
            title: post.title,
            body: post.body,
        }
    }
}

/// TheSportsDB sends `"events": null` when a league has no results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PastEvents {
    #[serde(default)]
    pub events: Option<Vec<PastEvent>>,
}

/// Scores arrive as strings ("2"), numbers, or null for unplayed games.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(i64),
    Text(String),
}

impl Score {
    fn as_int(&self) -> Option<i64> {
        match self {
            Score::Number(n) => Some(*n),
            Score::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastEvent {
    pub str_event: String,
    #[serde(default)]
    pub int_home_score: Option<Score>,
    #[serde(default)]
    pub int_away_score: Option<Score>,
}

impl From<PastEvent> for TickerItem {
    fn from(event: PastEvent) -> Self {
        TickerItem {
            home_score: event.int_home_score.as_ref().and_then(Score::as_int),
            away_score: event.int_away_score.as_ref().and_then(Score::as_int),
            description: event.str_event,
        }
    }
}

/// Ticker items in response order.
pub fn ticker_items(past: PastEvents) -> Vec<TickerItem> {
    past.events
        .unwrap_or_default()
        .into_iter()
        .map(TickerItem::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticker_items_from_mixed_scores() {
        let past: PastEvents = serde_json::from_value(json!({
            "events": [
                { "strEvent": "Arsenal vs Chelsea", "intHomeScore": "2", "intAwayScore": "1" },
                { "strEvent": "Everton vs Spurs", "intHomeScore": 0, "intAwayScore": 3 },
                { "strEvent": "Fulham vs Brentford", "intHomeScore": null, "intAwayScore": "" }
            ]
        }))
        .unwrap();
        let items = ticker_items(past);
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0],
            TickerItem {
                description: "Arsenal vs Chelsea".to_string(),
                home_score: Some(2),
                away_score: Some(1),
            }
        );
        assert_eq!(items[1].home_score, Some(0));
        assert_eq!(items[1].away_score, Some(3));
        assert_eq!(items[2].home_score, None);
        assert_eq!(items[2].away_score, None);
    }

    #[test]
    fn null_events_is_empty() {
        let past: PastEvents = serde_json::from_value(json!({ "events": null })).unwrap();
        assert!(ticker_items(past).is_empty());
        let past: PastEvents = serde_json::from_value(json!({})).unwrap();
        assert!(ticker_items(past).is_empty());
    }

    #[test]
    fn event_without_description_is_rejected() {
        let res = serde_json::from_value::<PastEvents>(json!({
            "events": [ { "intHomeScore": "1", "intAwayScore": "1" } ]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn content_post_requires_title_and_body() {
        let post: ContentPost =
            serde_json::from_value(json!({ "userId": 1, "id": 1, "title": "t", "body": "b" }))
                .unwrap();
        let content = SidebarContent::from(post);
        assert_eq!(content.title, "t");
        assert_eq!(content.body, "b");
        assert!(serde_json::from_value::<ContentPost>(json!({ "title": "t" })).is_err());
    }
}
