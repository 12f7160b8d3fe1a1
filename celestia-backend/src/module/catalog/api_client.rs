//! HTTP transport for the catalog and satellite endpoints
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

use super::error::TransportError;
use crate::config::CatalogConfig;

/// Issues GET requests and hands back the raw body of successful responses.
///
/// Implementations are shared read-only across every concurrent satellite
/// fetch, so they must be safe to call from many tasks at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`. Network errors and non-2xx statuses are both errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &CatalogConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        trace!(url = url, "HTTP GET request starting");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        trace!(url = url, bytes = body.len(), "HTTP GET request completed");
        Ok(body.to_vec())
    }
}
