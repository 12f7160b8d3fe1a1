use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight satellite reference listed on a catalog body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteRef {
    /// Identifier used to build the detail URL, e.g. "phobos"
    pub id: String,
    /// Display name, e.g. "Phobos"
    pub name: String,
}

/// One body as returned by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Semi-major axis in km, when the API provides it
    #[serde(default)]
    pub semi_major_axis: Option<f64>,
    #[serde(default)]
    pub satellites: Vec<SatelliteRef>,
}

impl CatalogEntry {
    pub fn has_satellites(&self) -> bool {
        !self.satellites.is_empty()
    }
}

/// A satellite's full record, fetched individually
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteDetail {
    pub id: String,
    pub name: String,
    /// Surface gravity in m/s²
    pub gravity: f64,
    #[serde(default)]
    pub mean_radius: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub discovered_by: Option<String>,
    #[serde(default)]
    pub discovery_date: Option<String>,
}

/// A catalog body whose satellite references have been replaced by the
/// successfully fetched detail records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBody {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub semi_major_axis: Option<f64>,
    /// Successfully fetched satellites; order is not guaranteed
    pub satellites: Vec<SatelliteDetail>,
    /// Mean gravity of `satellites`, `None` when none were fetched
    pub average_satellite_gravity: Option<f64>,
}

impl EnrichedBody {
    /// Pass a catalog entry through without enrichment.
    pub fn unenriched(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            semi_major_axis: entry.semi_major_axis,
            satellites: Vec::new(),
            average_satellite_gravity: None,
        }
    }

    /// Attach fetched satellites and their derived statistic to an entry.
    pub fn enriched(
        entry: CatalogEntry,
        satellites: Vec<SatelliteDetail>,
        average_satellite_gravity: Option<f64>,
    ) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            semi_major_axis: entry.semi_major_axis,
            satellites,
            average_satellite_gravity,
        }
    }
}

/// The bodies produced by one catalog fetch, in catalog order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// When this result set was fetched
    pub fetched_at: DateTime<Utc>,
    pub bodies: Vec<EnrichedBody>,
}

impl ResultSet {
    pub fn new(bodies: Vec<EnrichedBody>) -> Self {
        Self {
            fetched_at: Utc::now(),
            bodies,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedBody> {
        self.bodies.iter()
    }

    /// Total number of satellites fetched across all bodies.
    pub fn satellite_count(&self) -> usize {
        self.bodies.iter().map(|body| body.satellites.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a EnrichedBody;
    type IntoIter = std::slice::Iter<'a, EnrichedBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
