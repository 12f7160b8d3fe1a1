//! Wire format of the Solar System OpenData API
//!
//! Only the fields the pipeline needs are modelled; everything else in the
//! responses is ignored.

use celestia_common::{CatalogEntry, SatelliteDetail, SatelliteRef};
use serde::Deserialize;

use super::error::SatelliteFetchError;

/// Envelope returned by the catalog endpoint
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    bodies: Vec<RawBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBody {
    id: String,
    #[serde(default)]
    english_name: String,
    #[serde(default)]
    semimajor_axis: Option<f64>,
    /// `null` for bodies without moons
    #[serde(default)]
    moons: Option<Vec<RawMoonRef>>,
}

/// Moon reference embedded in a body, e.g.
/// `{ "moon": "Phobos", "rel": "https://api.le-systeme-solaire.net/rest/bodies/phobos" }`
#[derive(Debug, Deserialize)]
struct RawMoonRef {
    moon: String,
    #[serde(default)]
    rel: String,
}

/// Full moon record from the detail endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMoon {
    id: String,
    #[serde(default)]
    english_name: String,
    #[serde(default)]
    gravity: f64,
    #[serde(default)]
    mean_radius: Option<f64>,
    #[serde(default)]
    density: Option<f64>,
    #[serde(default)]
    discovered_by: Option<String>,
    #[serde(default)]
    discovery_date: Option<String>,
}

impl From<RawMoonRef> for SatelliteRef {
    fn from(raw: RawMoonRef) -> Self {
        // The detail id is the last path segment of `rel`
        let id = raw
            .rel
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| raw.moon.to_lowercase());

        SatelliteRef { id, name: raw.moon }
    }
}

impl From<RawBody> for CatalogEntry {
    fn from(raw: RawBody) -> Self {
        let name = if raw.english_name.is_empty() { raw.id.clone() } else { raw.english_name };
        CatalogEntry {
            id: raw.id,
            name,
            semi_major_axis: raw.semimajor_axis,
            satellites: raw
                .moons
                .unwrap_or_default()
                .into_iter()
                .map(SatelliteRef::from)
                .collect(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawMoon> for SatelliteDetail {
    fn from(raw: RawMoon) -> Self {
        let name = if raw.english_name.is_empty() { raw.id.clone() } else { raw.english_name };
        SatelliteDetail {
            id: raw.id,
            name,
            gravity: raw.gravity,
            mean_radius: raw.mean_radius,
            density: raw.density,
            discovered_by: non_empty(raw.discovered_by),
            discovery_date: non_empty(raw.discovery_date),
        }
    }
}

/// Parse a catalog response. `Ok(None)` means the body held no value (`null`).
pub fn parse_catalog(body: &[u8]) -> Result<Option<Vec<CatalogEntry>>, serde_json::Error> {
    let response: Option<CatalogResponse> = serde_json::from_slice(body)?;
    Ok(response.map(|r| r.bodies.into_iter().map(CatalogEntry::from).collect()))
}

/// Parse one satellite detail response.
pub fn parse_satellite(body: &[u8]) -> Result<SatelliteDetail, SatelliteFetchError> {
    let moon: Option<RawMoon> = serde_json::from_slice(body)?;
    moon.map(SatelliteDetail::from).ok_or(SatelliteFetchError::Empty)
}
