use std::time::Duration;
use thiserror::Error;

/// Failure of a single GET issued through a [`Transport`](super::Transport).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Why one satellite was dropped from its body's detail list.
#[derive(Debug, Error)]
pub enum SatelliteFetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed satellite record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("satellite record was empty")]
    Empty,

    #[error("still outstanding after {0:?}")]
    TimedOut(Duration),
}

/// Errors that escape the catalog pipeline.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("satellite fan-out failed: {0}")]
    FanOut(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session scope is active in this flow")]
    NoScope,
}
