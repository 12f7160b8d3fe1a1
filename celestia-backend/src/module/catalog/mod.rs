//! Enriched celestial-body catalog
//!
//! Fetches the body catalog, fans out one request per moon for every body
//! that has moons, and attaches the mean moon gravity to each body.
//!
//! ## Main Components
//! - `CatalogOrchestrator`: catalog request and per-body enrichment
//! - `SatelliteFetcher`: concurrent moon fetches with partial-failure tolerance
//! - `average_gravity`: mean gravity over the fetched moons
//! - `Session`: flow-scoped slot holding the latest `ResultSet`

mod error;
pub use error::{CatalogError, SatelliteFetchError, SessionError, TransportError};

mod types;
pub use types::{parse_catalog, parse_satellite};

mod api_client;
pub use api_client::{ReqwestTransport, Transport};

mod aggregate;
pub use aggregate::average_gravity;

mod fetcher;
pub use fetcher::{FetchOutcome, FetcherOptions, SatelliteFailure, SatelliteFetcher};

mod orchestrator;
pub use orchestrator::CatalogOrchestrator;

mod report;
pub use report::FetchReport;

mod session;
pub use session::Session;

mod renderer;
pub use renderer::{render_json, render_table};

#[cfg(test)]
mod mock;
