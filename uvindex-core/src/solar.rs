//! Solar geometry: where the sun sits in the sky for a given point and
//! instant.
//!
//! Uses the standard NOAA-style chain — day-of-year declination, equation
//! of time, longitude correction, hour angle — which is accurate to well
//! under a degree of zenith angle, plenty for an empirical UV model.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use thiserror::Error;

use crate::model::GeoPoint;

const EARTH_AXIAL_TILT: f64 = 23.45;
const DEGREES_PER_HOUR: f64 = 15.0;

/// Invalid observer coordinates. The only failure the geometry can report;
/// the sun being below the horizon is a regular result, not an error.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// The sun's apparent position relative to the local horizon.
///
/// Derived output of [`solar_position`]; never constructed by callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Degrees above the horizon; negative when the sun is below it.
    pub altitude_deg: f64,
    /// Degrees from the local vertical; >= 90 means night.
    pub zenith_deg: f64,
}

impl SolarPosition {
    pub fn is_sun_up(&self) -> bool {
        self.zenith_deg < 90.0
    }
}

/// Compute the sun's altitude and zenith angle for `point` at `at`.
///
/// The instant carries its UTC offset: the astronomy runs on the UTC
/// instant while callers keep working in local civil time.
pub fn solar_position(
    point: GeoPoint,
    at: DateTime<FixedOffset>,
) -> Result<SolarPosition, GeometryError> {
    point.validate()?;

    let utc = at.with_timezone(&Utc);
    let day = f64::from(utc.ordinal());
    let utc_hours = f64::from(utc.hour())
        + f64::from(utc.minute()) / 60.0
        + f64::from(utc.second()) / 3600.0;

    let declination = solar_declination(day);
    let eot_minutes = equation_of_time(day);

    // Local solar time: UTC shifted by 4 minutes per degree of longitude
    // plus the equation-of-time correction.
    let solar_hours =
        (utc_hours + (4.0 * point.longitude + eot_minutes) / 60.0).rem_euclid(24.0);
    let hour_angle = DEGREES_PER_HOUR * (solar_hours - 12.0);

    let lat = point.latitude.to_radians();
    let dec = declination.to_radians();
    let ha = hour_angle.to_radians();

    let cos_zenith = lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos();
    let zenith_deg = cos_zenith.clamp(-1.0, 1.0).acos().to_degrees();

    Ok(SolarPosition { altitude_deg: 90.0 - zenith_deg, zenith_deg })
}

/// Solar declination in degrees (Cooper's formula).
fn solar_declination(day_of_year: f64) -> f64 {
    EARTH_AXIAL_TILT * (360.0 / 365.0 * (284.0 + day_of_year)).to_radians().sin()
}

/// Equation of time in minutes for the given day of year.
fn equation_of_time(day_of_year: f64) -> f64 {
    let b = ((day_of_year - 1.0) * 360.0 / 365.0).to_radians();
    229.18
        * (0.000075 + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    const LIVONIA: GeoPoint = GeoPoint { latitude: 42.3834, longitude: -83.3527 };

    fn eastern_daylight(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn summer_midday_sun_is_high() {
        let position = solar_position(LIVONIA, eastern_daylight(2025, 7, 1, 12, 30)).unwrap();

        assert!(position.is_sun_up());
        assert!(position.altitude_deg > 60.0, "altitude {}", position.altitude_deg);
        assert!(position.altitude_deg < 72.0, "altitude {}", position.altitude_deg);
    }

    #[test]
    fn zenith_is_complement_of_altitude() {
        let position = solar_position(LIVONIA, eastern_daylight(2025, 7, 1, 9, 0)).unwrap();
        assert!((position.altitude_deg + position.zenith_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn sun_is_down_at_night() {
        let position = solar_position(LIVONIA, eastern_daylight(2025, 7, 1, 23, 30)).unwrap();

        assert!(!position.is_sun_up());
        assert!(position.altitude_deg < 0.0);
    }

    #[test]
    fn winter_sun_sits_lower_than_summer_sun() {
        let winter = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 15, 12, 30, 0)
            .unwrap();
        let summer = eastern_daylight(2025, 7, 1, 12, 30);

        let winter_alt = solar_position(LIVONIA, winter).unwrap().altitude_deg;
        let summer_alt = solar_position(LIVONIA, summer).unwrap().altitude_deg;

        assert!(winter_alt < summer_alt - 30.0);
    }

    #[test]
    fn invalid_latitude_is_a_geometry_error() {
        let err = solar_position(GeoPoint::new(999.0, 0.0), eastern_daylight(2025, 7, 1, 12, 0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::LatitudeOutOfRange(_)));
    }

    #[test]
    fn invalid_longitude_is_a_geometry_error() {
        let err = solar_position(GeoPoint::new(0.0, 300.0), eastern_daylight(2025, 7, 1, 12, 0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::LongitudeOutOfRange(_)));
    }

    #[test]
    fn equator_noon_near_equinox_is_almost_overhead() {
        // Equinox sun over the equator: zenith within a few degrees of zero.
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 21, 12, 0, 0)
            .unwrap();
        let position = solar_position(GeoPoint::new(0.0, 0.0), at).unwrap();

        assert!(position.zenith_deg < 5.0, "zenith {}", position.zenith_deg);
    }
}
