pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod espn;
pub mod feeds;
pub mod reporter;
pub mod scheduler;
pub mod state;
pub mod types;

/// ESPN MLB scoreboard (today's games).
pub const SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb/scoreboard";

/// ESPN MLB game summary; takes the game id as the `event` query parameter.
pub const SUMMARY_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb/summary";

/// Generic content endpoint feeding the dashboard sidebar.
pub const SIDEBAR_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";

/// TheSportsDB past events for league 4328 (English Premier League).
pub const TICKER_URL: &str =
    "https://www.thesportsdb.com/api/v1/json/1/eventspastleague.php?id=4328";

/// Page shown next to the dashboard panels.
pub const PAGE_URL: &str = "https://www.mlb.com/";
