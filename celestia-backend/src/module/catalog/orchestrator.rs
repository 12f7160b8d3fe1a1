//! Catalog fetch and per-body enrichment
use celestia_common::{CatalogEntry, EnrichedBody, ResultSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

use super::aggregate::average_gravity;
use super::api_client::Transport;
use super::error::CatalogError;
use super::fetcher::{FetcherOptions, SatelliteFetcher};
use super::report::FetchReport;
use super::session::Session;
use super::types::parse_catalog;
use crate::config::CatalogConfig;

pub struct CatalogOrchestrator<T> {
    transport: Arc<T>,
    fetcher: SatelliteFetcher<T>,
    catalog_url: String,
}

impl<T> CatalogOrchestrator<T>
where
    T: Transport + 'static,
{
    pub fn new(transport: Arc<T>, config: &CatalogConfig) -> Self {
        Self::with_options(transport, config.catalog_url(), FetcherOptions::from_config(config))
    }

    pub fn with_options(transport: Arc<T>, catalog_url: String, options: FetcherOptions) -> Self {
        let fetcher = SatelliteFetcher::new(Arc::clone(&transport), options);
        Self { transport, fetcher, catalog_url }
    }

    /// Fetch the catalog and enrich every body that lists satellites.
    ///
    /// Bodies come back in catalog order. A failed or unreadable catalog
    /// yields an empty result set. The result is also published to the
    /// current [`Session`] before it is returned.
    pub async fn fetch_enriched_catalog(&self) -> Result<Arc<ResultSet>, CatalogError> {
        let span = info_span!("catalog", url = %self.catalog_url);
        async {
            let started = Instant::now();
            let mut report = FetchReport::new();

            let bodies = match self.fetch_catalog().await {
                Some(entries) => {
                    info!("Catalog lists {} bodies", entries.len());
                    let mut bodies = Vec::with_capacity(entries.len());
                    for entry in entries {
                        bodies.push(self.enrich_body(entry, &mut report).await?);
                    }
                    bodies
                }
                None => Vec::new(),
            };

            report.duration_seconds = started.elapsed().as_secs_f64();
            report.log();

            let results = Arc::new(ResultSet::new(bodies));
            if Session::set(Arc::clone(&results)).is_err() {
                warn!("No session scope active, catalog result not published");
            }

            Ok::<_, CatalogError>(results)
        }
        .instrument(span)
        .await
    }

    /// `None` when the request failed or the body held no catalog.
    async fn fetch_catalog(&self) -> Option<Vec<CatalogEntry>> {
        info!("Fetching catalog");

        let body = match self.transport.get(&self.catalog_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Catalog request failed: {}", e);
                return None;
            }
        };

        match parse_catalog(&body) {
            Ok(Some(entries)) => Some(entries),
            Ok(None) => {
                warn!("Catalog response was empty");
                None
            }
            Err(e) => {
                warn!("Failed to parse catalog response: {}", e);
                None
            }
        }
    }

    async fn enrich_body(
        &self,
        entry: CatalogEntry,
        report: &mut FetchReport,
    ) -> Result<EnrichedBody, CatalogError> {
        if !entry.has_satellites() {
            debug!(body = %entry.id, "No moons, passing through");
            report.record_body(None);
            return Ok(EnrichedBody::unenriched(entry));
        }

        let span = info_span!("body", id = %entry.id, moons = entry.satellites.len());
        let outcome = self.fetcher.fetch_outcome(&entry.satellites).instrument(span).await?;
        report.record_body(Some(&outcome));

        if outcome.failure_count() > 0 {
            debug!(
                body = %entry.id,
                "{} of {} moons could not be fetched",
                outcome.failure_count(),
                entry.satellites.len()
            );
        }

        let satellites = outcome.into_details();
        let average = average_gravity(&satellites);
        Ok(EnrichedBody::enriched(entry, satellites, average))
    }
}
