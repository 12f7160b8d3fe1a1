//! Concurrent satellite detail fetching
//!
//! One task is spawned per satellite reference on a `JoinSet`, all of them
//! up front. The fetch returns only once every task has settled, so callers
//! never see a detail list while requests are still outstanding.
//!
//! Individual failures (network error, non-2xx status, malformed body) drop
//! that satellite from the result. They are kept in [`FetchOutcome::failed`]
//! so callers can report on them.

use celestia_common::{SatelliteDetail, SatelliteRef};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::api_client::Transport;
use super::error::{CatalogError, SatelliteFetchError};
use super::types::parse_satellite;
use crate::config::CatalogConfig;

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// Detail URL of a satellite is this prefix followed by its id
    pub satellite_url_prefix: String,
    /// 0 = unbounded
    pub max_concurrent_requests: usize,
    /// Deadline for all fetches of one body
    pub body_timeout: Option<Duration>,
}

impl FetcherOptions {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            satellite_url_prefix: config.satellite_url(""),
            max_concurrent_requests: config.max_concurrent_requests,
            body_timeout: (config.body_timeout_secs > 0)
                .then(|| Duration::from_secs(config.body_timeout_secs)),
        }
    }
}

/// A satellite that could not be fetched, with the reason
#[derive(Debug)]
pub struct SatelliteFailure {
    pub satellite: SatelliteRef,
    pub error: SatelliteFetchError,
}

/// Settled result of one body's fan-out.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Completion order, not request order
    pub succeeded: Vec<SatelliteDetail>,
    pub failed: Vec<SatelliteFailure>,
}

impl FetchOutcome {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            succeeded: Vec::with_capacity(capacity),
            failed: Vec::new(),
        }
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn into_details(self) -> Vec<SatelliteDetail> {
        self.succeeded
    }
}

type FetchResult = (SatelliteRef, Result<SatelliteDetail, SatelliteFetchError>);

pub struct SatelliteFetcher<T> {
    transport: Arc<T>,
    options: FetcherOptions,
    limiter: Option<Arc<Semaphore>>,
}

impl<T> SatelliteFetcher<T>
where
    T: Transport + 'static,
{
    pub fn new(transport: Arc<T>, options: FetcherOptions) -> Self {
        let limiter = (options.max_concurrent_requests > 0)
            .then(|| Arc::new(Semaphore::new(options.max_concurrent_requests)));

        Self { transport, options, limiter }
    }

    /// Fetch every satellite in `refs` and return those that succeeded.
    pub async fn fetch_all(&self, refs: &[SatelliteRef]) -> Result<Vec<SatelliteDetail>, CatalogError> {
        Ok(self.fetch_outcome(refs).await?.into_details())
    }

    /// Fetch every satellite in `refs`, keeping both successes and failures.
    ///
    /// Only a task that panicked or was cancelled by the runtime is an error.
    pub async fn fetch_outcome(&self, refs: &[SatelliteRef]) -> Result<FetchOutcome, CatalogError> {
        let mut outcome = FetchOutcome::with_capacity(refs.len());
        if refs.is_empty() {
            return Ok(outcome);
        }

        let mut tasks: JoinSet<FetchResult> = JoinSet::new();
        let mut pending: HashMap<Id, SatelliteRef> = HashMap::with_capacity(refs.len());

        for satellite in refs {
            let transport = Arc::clone(&self.transport);
            let limiter = self.limiter.clone();
            let url = format!("{}{}", self.options.satellite_url_prefix, satellite.id);
            let task_satellite = satellite.clone();

            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquiring only fails if it were
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                let result = match transport.get(&url).await {
                    Ok(body) => parse_satellite(&body),
                    Err(e) => Err(e.into()),
                };
                (task_satellite, result)
            });
            pending.insert(handle.id(), satellite.clone());
        }

        let deadline = self.options.body_timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let joined = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next_with_id()).await {
                    Ok(joined) => joined,
                    Err(_) => break,
                },
                None => tasks.join_next_with_id().await,
            };

            let Some(joined) = joined else {
                return Ok(outcome);
            };

            if let Err(e) = settle(joined, &mut pending, &mut outcome, None) {
                tasks.shutdown().await;
                return Err(e);
            }
        }

        // Deadline passed: abort what is left and wait for every task to settle
        let timeout = self.options.body_timeout.unwrap_or_default();
        warn!(
            outstanding = pending.len(),
            "Satellite fetches still outstanding after {:?}, aborting them", timeout
        );
        tasks.abort_all();

        while let Some(joined) = tasks.join_next_with_id().await {
            if let Err(e) = settle(joined, &mut pending, &mut outcome, Some(timeout)) {
                tasks.shutdown().await;
                return Err(e);
            }
        }

        Ok(outcome)
    }
}

/// Record one settled task. `aborted_after` is set once the body deadline has
/// passed, so that cancellations are counted as timeouts instead of errors.
fn settle(
    joined: Result<(Id, FetchResult), JoinError>,
    pending: &mut HashMap<Id, SatelliteRef>,
    outcome: &mut FetchOutcome,
    aborted_after: Option<Duration>,
) -> Result<(), CatalogError> {
    match joined {
        Ok((id, (_, Ok(detail)))) => {
            pending.remove(&id);
            outcome.succeeded.push(detail);
        }
        Ok((id, (satellite, Err(error)))) => {
            pending.remove(&id);
            debug!(satellite = %satellite.id, error = %error, "Dropping satellite");
            outcome.failed.push(SatelliteFailure { satellite, error });
        }
        Err(join_err) => match (aborted_after, pending.remove(&join_err.id())) {
            (Some(timeout), Some(satellite)) if join_err.is_cancelled() => {
                debug!(satellite = %satellite.id, "Dropping satellite, timed out");
                outcome.failed.push(SatelliteFailure {
                    satellite,
                    error: SatelliteFetchError::TimedOut(timeout),
                });
            }
            _ => return Err(CatalogError::FanOut(join_err)),
        },
    }

    Ok(())
}
