use serde::{Deserialize, Serialize};

use crate::risk::{RiskCategory, RiskColor};
use crate::solar::GeometryError;

/// A geographic point in decimal degrees.
///
/// Construction is unchecked so callers (and the engine's fallback path)
/// can observe the validation failure; `validate` enforces the coordinate
/// ranges before any geometry runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that the coordinates are on the globe.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeometryError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeometryError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Atmospheric conditions observed at the site, as delivered by a weather
/// provider.
///
/// `Default` is the neutral substitute used when upstream data is missing:
/// 0% cloud cover, no description, no temperature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedConditions {
    /// Cloud cover percentage in [0, 100].
    pub cloud_cover_pct: f64,
    /// Free-text weather description, e.g. "Partly Cloudy".
    pub description: Option<String>,
    /// Air temperature in Celsius.
    pub temperature_c: Option<f64>,
}

/// Current-weather observation as fetched from a conditions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub provider: String,
    pub temperature_c: Option<f64>,
    pub description: Option<String>,
    pub humidity_pct: Option<f64>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub cloud_cover_pct: f64,
}

impl WeatherSnapshot {
    /// The subset of the snapshot the estimation engine consumes.
    pub fn conditions(&self) -> ObservedConditions {
        ObservedConditions {
            cloud_cover_pct: self.cloud_cover_pct,
            description: self.description.clone(),
            temperature_c: self.temperature_c,
        }
    }
}

/// Final output of the estimation engine: the rounded UV index value plus
/// its risk classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UvIndexResult {
    pub value: f64,
    pub category: RiskCategory,
    pub color: RiskColor,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates_pass_validation() {
        assert!(GeoPoint::new(42.3834, -83.3527).validate().is_ok());
        assert!(GeoPoint::new(-90.0, 180.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = GeoPoint::new(999.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, GeometryError::LatitudeOutOfRange(_)));
    }

    #[test]
    fn out_of_range_longitude_is_rejected() {
        let err = GeoPoint::new(0.0, -200.0).validate().unwrap_err();
        assert!(matches!(err, GeometryError::LongitudeOutOfRange(_)));
    }

    #[test]
    fn nan_coordinates_are_rejected() {
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn default_conditions_are_neutral() {
        let conditions = ObservedConditions::default();
        assert_eq!(conditions.cloud_cover_pct, 0.0);
        assert!(conditions.description.is_none());
        assert!(conditions.temperature_c.is_none());
    }

    #[test]
    fn snapshot_projects_engine_inputs() {
        let snapshot = WeatherSnapshot {
            provider: "nws".to_string(),
            temperature_c: Some(21.0),
            description: Some("Partly Cloudy".to_string()),
            humidity_pct: Some(60.0),
            wind_speed: Some("10 mph".to_string()),
            wind_direction: Some("NW".to_string()),
            cloud_cover_pct: 50.0,
        };

        let conditions = snapshot.conditions();
        assert_eq!(conditions.cloud_cover_pct, 50.0);
        assert_eq!(conditions.description.as_deref(), Some("Partly Cloudy"));
        assert_eq!(conditions.temperature_c, Some(21.0));
    }
}
