//! In-memory transport for unit tests
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::api_client::Transport;
use super::error::TransportError;

enum Reply {
    Body { body: Vec<u8>, delay: Duration },
    Error(TransportError),
    Hang,
    Panic,
}

/// Serves canned replies keyed by URL; unknown URLs get a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, url: &str, value: serde_json::Value) -> Self {
        self.json_after(url, value, Duration::ZERO)
    }

    pub fn json_after(mut self, url: &str, value: serde_json::Value, delay: Duration) -> Self {
        let body = value.to_string().into_bytes();
        self.replies.insert(url.to_string(), Reply::Body { body, delay });
        self
    }

    pub fn raw(mut self, url: &str, body: &[u8]) -> Self {
        self.replies.insert(
            url.to_string(),
            Reply::Body { body: body.to_vec(), delay: Duration::ZERO },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        let error = TransportError::Status { status, url: url.to_string() };
        self.replies.insert(url.to_string(), Reply::Error(error));
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        let error = TransportError::Request {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        };
        self.replies.insert(url.to_string(), Reply::Error(error));
        self
    }

    pub fn hang(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Hang);
        self
    }

    /// The request task panics, as a bug in the transport would.
    pub fn panic(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Panic);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match self.replies.get(url) {
            Some(Reply::Body { body, delay }) => {
                // Yield at least once so concurrent requests overlap
                tokio::time::sleep((*delay).max(Duration::from_millis(5))).await;
                Ok(body.clone())
            }
            Some(Reply::Error(error)) => Err(error.clone()),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Panic) => panic!("transport bug while fetching {}", url),
            None => Err(TransportError::Status { status: 404, url: url.to_string() }),
        }
    }
}
