use serde::{Deserialize, Serialize};
use std::fmt;

const BOUNDARY_TOLERANCE_KM: f64 = 1e-9;

/// Distance in kilometers
/// Prevents mixing up units and provides type safety
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    pub fn new(km: f64) -> Result<Self, String> {
        if km < 0.0 {
            return Err("Distance cannot be negative".to_string());
        }
        if !km.is_finite() {
            return Err("Distance must be a finite number".to_string());
        }
        Ok(DistanceKm(km))
    }

    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }

    pub fn as_meters(self) -> f64 {
        self.0 * 1000.0
    }

    /// Inclusive threshold test: `d` lies within this distance.
    /// Floating-point noise below a micrometre is ignored.
    pub fn contains(self, d: f64) -> bool {
        d <= self.0 + BOUNDARY_TOLERANCE_KM
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}km", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_km_creation() {
        assert!(DistanceKm::new(5.0).is_ok());
        assert!(DistanceKm::new(0.0).is_ok());
        assert!(DistanceKm::new(-1.0).is_err());
        assert!(DistanceKm::new(f64::INFINITY).is_err());
        assert!(DistanceKm::new(f64::NAN).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let radius = DistanceKm::new(0.5).unwrap();
        assert!(radius.contains(0.5));
        assert!(radius.contains(0.0));
        assert!(!radius.contains(0.51));
    }

    #[test]
    fn test_distance_km_display() {
        let d = DistanceKm::new(5.123).unwrap();
        assert_eq!(format!("{}", d), "5.12km");
        assert_eq!(d.as_meters(), 5123.0);
    }
}
