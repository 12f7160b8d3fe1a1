use celestia_common::SatelliteDetail;

/// Mean surface gravity of `details`.
///
/// Returns `None` for an empty slice rather than dividing by zero.
pub fn average_gravity(details: &[SatelliteDetail]) -> Option<f64> {
    if details.is_empty() {
        return None;
    }

    let total: f64 = details.iter().map(|d| d.gravity).sum();
    Some(total / details.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon(gravity: f64) -> SatelliteDetail {
        SatelliteDetail {
            id: format!("moon-{}", gravity),
            name: "Moon".to_string(),
            gravity,
            mean_radius: None,
            density: None,
            discovered_by: None,
            discovery_date: None,
        }
    }

    #[test]
    fn test_average_of_three() {
        let details = vec![moon(1.0), moon(2.0), moon(3.0)];
        assert_eq!(average_gravity(&details), Some(2.0));
    }

    #[test]
    fn test_single_moon() {
        assert_eq!(average_gravity(&[moon(1.62)]), Some(1.62));
    }

    #[test]
    fn test_empty_is_undefined_not_nan_or_zero() {
        assert_eq!(average_gravity(&[]), None);
    }

    #[test]
    fn test_zero_gravity_moons_still_define_the_mean() {
        assert_eq!(average_gravity(&[moon(0.0), moon(0.0)]), Some(0.0));
    }
}
