use tracing::info;

use super::fetcher::FetchOutcome;

/// Counters for one catalog fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    pub total_bodies: usize,
    /// Bodies with at least one satellite reference
    pub enriched_bodies: usize,
    pub satellites_requested: usize,
    pub satellites_fetched: usize,
    pub satellites_failed: usize,
    pub duration_seconds: f64,
}

impl FetchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_body(&mut self, outcome: Option<&FetchOutcome>) {
        self.total_bodies += 1;
        if let Some(outcome) = outcome {
            self.enriched_bodies += 1;
            self.satellites_requested += outcome.success_count() + outcome.failure_count();
            self.satellites_fetched += outcome.success_count();
            self.satellites_failed += outcome.failure_count();
        }
    }

    pub fn log(&self) {
        info!(
            "Catalog fetch completed: {} bodies ({} with moons), {}/{} moons fetched, {} failed, {:.2}s",
            self.total_bodies,
            self.enriched_bodies,
            self.satellites_fetched,
            self.satellites_requested,
            self.satellites_failed,
            self.duration_seconds
        );
    }
}
