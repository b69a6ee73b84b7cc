//! Fetch error types
//!
//! Every failure a refresh can hit while talking to a data endpoint.

use thiserror::Error;

/// Errors raised while fetching or decoding an endpoint response
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, DNS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),

    /// A statistic value that is not an integer
    #[error("statistic {label:?} has non-integer value {value:?}")]
    InvalidStat { label: String, value: String },

    /// Endpoint URL could not be built
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
