use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::{AppConfig, EndpointsConfig};
use crate::error::{FetchError, FetchResult};
use crate::espn::{self, Scoreboard, Summary};
use crate::feeds::{self, ContentPost, PastEvents};
use crate::types::{Event, SidebarContent, StatLookup, TickerItem};

/// Games, players and box score statistics for the tracker.
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Today's games.
    async fn fetch_events(&self) -> FetchResult<Vec<Event>>;

    /// Sorted, duplicate-free player names of one game.
    async fn fetch_participants(&self, event_id: &str) -> FetchResult<Vec<String>>;

    /// Current value of `stat` for `participant` in one game.
    async fn fetch_stat(
        &self,
        event_id: &str,
        participant: &str,
        stat: &str,
    ) -> FetchResult<StatLookup>;
}

/// Content for the two dashboard panels.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch_sidebar(&self) -> FetchResult<SidebarContent>;

    /// Recent results, newest first as the endpoint returns them.
    async fn fetch_recent_events(&self) -> FetchResult<Vec<TickerItem>>;
}

/// HTTP client for every endpoint both apps poll.
pub struct SportsClient {
    http: Client,
    endpoints: EndpointsConfig,
}

impl SportsClient {
    /// Build a client whose requests all time out after `timeout`.
    pub fn new(endpoints: EndpointsConfig, timeout: Duration) -> FetchResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoints))
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(http: Client, endpoints: EndpointsConfig) -> Self {
        Self { http, endpoints }
    }

    pub fn from_config(config: &AppConfig) -> FetchResult<Self> {
        Self::new(
            config.endpoints.clone(),
            config.settings.request_timeout(),
        )
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }

    /// Summary URL for one game (`?event=<id>`).
    pub fn summary_url(&self, event_id: &str) -> FetchResult<Url> {
        let mut url = Url::parse(&self.endpoints.summary_url)?;
        url.query_pairs_mut().append_pair("event", event_id);
        Ok(url)
    }

    /// GET `url` and decode the body. Shape mismatches surface as
    /// `FetchError::Parse`, not as transport errors.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.bytes().await?;
        debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(serde_json::from_slice(&body)?)
    }

    /// Raw scoreboard response.
    pub async fn scoreboard(&self) -> FetchResult<Scoreboard> {
        let url = Url::parse(&self.endpoints.scoreboard_url)?;
        self.get_json(url).await
    }

    /// Raw game summary response.
    pub async fn summary(&self, event_id: &str) -> FetchResult<Summary> {
        let url = self.summary_url(event_id)?;
        self.get_json(url).await
    }
}

#[async_trait]
impl StatSource for SportsClient {
    async fn fetch_events(&self) -> FetchResult<Vec<Event>> {
        let events = espn::events_from_scoreboard(self.scoreboard().await?);
        debug!("Fetched {} events", events.len());
        Ok(events)
    }

    async fn fetch_participants(&self, event_id: &str) -> FetchResult<Vec<String>> {
        let summary = self.summary(event_id).await?;
        let names = espn::participants(&summary);
        debug!("Fetched {} participants for event {event_id}", names.len());
        Ok(names)
    }

    async fn fetch_stat(
        &self,
        event_id: &str,
        participant: &str,
        stat: &str,
    ) -> FetchResult<StatLookup> {
        let summary = self.summary(event_id).await?;
        espn::lookup_stat(&summary, participant, stat)
    }
}

#[async_trait]
impl DashboardSource for SportsClient {
    async fn fetch_sidebar(&self) -> FetchResult<SidebarContent> {
        let url = Url::parse(&self.endpoints.sidebar_url)?;
        let post: ContentPost = self.get_json(url).await?;
        Ok(post.into())
    }

    async fn fetch_recent_events(&self) -> FetchResult<Vec<TickerItem>> {
        let url = Url::parse(&self.endpoints.ticker_url)?;
        let past: PastEvents = self.get_json(url).await?;
        Ok(feeds::ticker_items(past))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `body` with `status` to every connection; returns the base URL.
    async fn serve(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let resp = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(resp.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str) -> SportsClient {
        let endpoints = EndpointsConfig {
            scoreboard_url: format!("{base}/scoreboard"),
            summary_url: format!("{base}/summary"),
            sidebar_url: format!("{base}/posts/1"),
            ticker_url: format!("{base}/eventspastleague.php?id=4328"),
            page_url: format!("{base}/"),
        };
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        SportsClient::with_client(http, endpoints)
    }

    #[test]
    fn summary_url_appends_event() {
        let client = SportsClient::new(EndpointsConfig::default(), Duration::from_secs(1)).unwrap();
        let url = client.summary_url("401569123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb/summary?event=401569123"
        );
    }

    #[tokio::test]
    async fn fetch_stat_over_http() {
        let body = json!({
            "boxscore": { "players": [ { "statistics": [ {
                "labels": ["AB", "H", "RBI"],
                "descriptions": ["At Bats", "Hits", "RBIs"],
                "athletes": [ { "athlete": { "displayName": "Aaron Judge" }, "stats": ["4", "2", "1"] } ]
            } ] } ] }
        });
        let base = serve("200 OK", body.to_string()).await;
        let client = client_for(&base);
        let lookup = client.fetch_stat("123", "Aaron Judge", "Hits").await.unwrap();
        assert_eq!(lookup, StatLookup::Found(2));
        let names = client.fetch_participants("123").await.unwrap();
        assert_eq!(names, vec!["Aaron Judge"]);
    }

    #[tokio::test]
    async fn fetch_sidebar_over_http() {
        let body = json!({ "userId": 1, "id": 1, "title": "Opening Day", "body": "Lineups posted" });
        let base = serve("200 OK", body.to_string()).await;
        let content = client_for(&base).fetch_sidebar().await.unwrap();
        assert_eq!(content.title, "Opening Day");
        assert_eq!(content.body, "Lineups posted");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let base = serve("503 Service Unavailable", "{}".to_string()).await;
        let err = client_for(&base).fetch_events().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let base = serve("200 OK", "<html>down</html>".to_string()).await;
        let err = client_for(&base).fetch_recent_events().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(&format!("http://{addr}"))
            .fetch_sidebar()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
