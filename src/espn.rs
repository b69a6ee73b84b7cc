//! ESPN scoreboard and game summary responses.
//!
//! Wire structs keep every field the code reads optional or defaulted, so a
//! missing key is an explicit fallback rather than a decode failure. The
//! extraction functions are pure and work on already decoded responses.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::error::{FetchError, FetchResult};
use crate::types::{Event, StatLookup};

/// Game ids come back as strings, but numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Text(String),
    Number(i64),
}

impl EventId {
    pub fn into_string(self) -> String {
        match self {
            EventId::Text(s) => s,
            EventId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub events: Vec<ScoreboardEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreboardEvent {
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Competitor {
    pub team: Option<Team>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    pub boxscore: Option<Boxscore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Boxscore {
    #[serde(default)]
    pub players: Vec<TeamPlayers>,
}

/// One team's block of the box score.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPlayers {
    #[serde(default)]
    pub statistics: Vec<StatGroup>,
}

/// A statistic group (batting, pitching). `labels` and `descriptions` are
/// aligned positionally with every athlete's `stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatGroup {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteLine {
    pub athlete: Option<Athlete>,
    #[serde(default)]
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub display_name: Option<String>,
}

impl AthleteLine {
    fn display_name(&self) -> Option<&str> {
        self.athlete.as_ref()?.display_name.as_deref()
    }
}

impl Summary {
    /// Every statistic group, team order first, then group order.
    fn groups(&self) -> impl Iterator<Item = &StatGroup> {
        self.boxscore
            .iter()
            .flat_map(|b| b.players.iter())
            .flat_map(|team| team.statistics.iter())
    }
}

/// Convert the scoreboard into events. Events without a competition are
/// skipped; teams come from the first competition only.
pub fn events_from_scoreboard(board: Scoreboard) -> Vec<Event> {
    board
        .events
        .into_iter()
        .filter_map(|event| {
            let competition = event.competitions.into_iter().next()?;
            let teams = competition
                .competitors
                .into_iter()
                .filter_map(|c| c.team?.display_name)
                .collect();
            Some(Event {
                id: event.id.into_string(),
                name: event.name,
                teams,
            })
        })
        .collect()
}

/// Sorted, duplicate-free display names of every athlete in the box score.
pub fn participants(summary: &Summary) -> Vec<String> {
    let names: BTreeSet<&str> = summary
        .groups()
        .flat_map(|g| g.athletes.iter())
        .filter_map(AthleteLine::display_name)
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Label → raw value mapping for one athlete in one statistic group.
///
/// Built fresh from a response on every read. Long descriptions ("Hits") take
/// precedence over short labels ("H").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSnapshot {
    by_description: HashMap<String, String>,
    by_label: HashMap<String, String>,
}

impl StatSnapshot {
    fn new(group: &StatGroup, line: &AthleteLine) -> Self {
        let zip = |keys: &[String]| {
            keys.iter()
                .cloned()
                .zip(line.stats.iter().cloned())
                .collect::<HashMap<_, _>>()
        };
        Self {
            by_description: zip(group.descriptions.as_slice()),
            by_label: zip(group.labels.as_slice()),
        }
    }

    pub fn get(&self, stat: &str) -> Option<&str> {
        self.by_description
            .get(stat)
            .or_else(|| self.by_label.get(stat))
            .map(String::as_str)
    }
}

/// Snapshot from the first group holding an athlete named `participant`.
pub fn snapshot_for(summary: &Summary, participant: &str) -> Option<StatSnapshot> {
    summary.groups().find_map(|group| {
        group
            .athletes
            .iter()
            .find(|line| line.display_name() == Some(participant))
            .map(|line| StatSnapshot::new(group, line))
    })
}

/// Resolve `stat` for `participant`.
///
/// Only the first group containing the athlete is consulted, so a label that
/// lives in a later group resolves to `MissingLabel`.
pub fn lookup_stat(summary: &Summary, participant: &str, stat: &str) -> FetchResult<StatLookup> {
    let Some(snapshot) = snapshot_for(summary, participant) else {
        return Ok(StatLookup::MissingParticipant);
    };
    let Some(raw) = snapshot.get(stat) else {
        return Ok(StatLookup::MissingLabel);
    };
    raw.trim()
        .parse::<i64>()
        .map(StatLookup::Found)
        .map_err(|_| FetchError::InvalidStat {
            label: stat.to_string(),
            value: raw.to_string(),
        })
}
