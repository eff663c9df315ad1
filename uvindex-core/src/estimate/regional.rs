//! Regional corrections tuned for the deployment region (southeast
//! Michigan): discrete winter damping, ambient humidity/air quality,
//! proximity to the Detroit urban core, and a cold-weather perception
//! correction.

use chrono::{DateTime, Datelike, FixedOffset};

use super::ModelParams;
use crate::model::GeoPoint;

/// Multiplicative factor in (0, 1] combining the regional sub-factors.
pub(crate) fn regional_factor(
    params: &ModelParams,
    point: GeoPoint,
    at: DateTime<FixedOffset>,
    temperature_c: Option<f64>,
) -> f64 {
    let seasonal = match at.month() {
        12 | 1 | 2 => 0.7,
        3 | 11 => 0.85,
        _ => 1.0,
    };

    // Planar distance in raw coordinate degrees, not kilometres. The
    // thresholds were tuned against this measure; do not convert.
    let urban = {
        let dlat = point.latitude - params.urban_center.latitude;
        let dlon = point.longitude - params.urban_center.longitude;
        let degrees = (dlat * dlat + dlon * dlon).sqrt();
        if degrees < 0.5 {
            0.85
        } else if degrees < 1.0 {
            0.9
        } else {
            1.0
        }
    };

    // People overestimate UV when it feels cold; damp the estimate a
    // little on cold days.
    let perception = match temperature_c {
        Some(t) if t < 5.0 => 0.85,
        Some(t) if t < 15.0 => 0.9,
        _ => 1.0,
    };

    seasonal * params.ambient_damping * urban * perception
}
