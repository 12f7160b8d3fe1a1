mod types;

pub use types::{CatalogEntry, EnrichedBody, ResultSet, SatelliteDetail, SatelliteRef};
