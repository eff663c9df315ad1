//! The UV estimation engine: clear-sky base model shaped by cloud and
//! regional multipliers, with a month-average fallback when the solar
//! geometry cannot be computed.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::{GeoPoint, ObservedConditions, UvIndexResult};
use crate::risk::RiskTable;
use crate::solar;

mod base;
mod cloud;
mod regional;

/// Tuning constants for the estimation model.
///
/// These are configuration, not physical law: `uv_max` is the ceiling
/// observed for the target region, the exponents were fitted against local
/// measurements, and the urban center anchors the proximity damping.
/// Defaults describe Livonia, Michigan. Built once at startup (optionally
/// overridden from the config file) and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Clear-sky UV ceiling for the region.
    pub uv_max: f64,
    /// Exponent of the `cos(zenith)` power law.
    pub zenith_exponent: f64,
    /// Scale of the linear ramp used for zenith angles past 75 degrees.
    pub horizon_coefficient: f64,
    /// Site elevation above sea level in metres.
    pub elevation_m: f64,
    /// Fixed humidity / air-quality damping for the region.
    pub ambient_damping: f64,
    /// Average UV index per calendar month, used when solar geometry is
    /// unavailable.
    pub monthly_average_uv: [f64; 12],
    /// Urban-core coordinate the proximity damping is measured against.
    pub urban_center: GeoPoint,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            uv_max: 11.0,
            zenith_exponent: 1.35,
            horizon_coefficient: 0.15,
            elevation_m: 200.0,
            ambient_damping: 0.95,
            monthly_average_uv: [
                3.0, 4.0, 5.5, 7.0, 8.5, 9.0, 8.5, 7.0, 5.5, 4.0, 3.0, 2.5,
            ],
            // Downtown Detroit.
            urban_center: GeoPoint { latitude: 42.3314, longitude: -83.0458 },
        }
    }
}

/// The estimation engine. Stateless apart from its immutable parameters;
/// every call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct UvEstimator {
    params: ModelParams,
}

impl UvEstimator {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Estimate the UV index at `point` for the local civil instant `at`
    /// under the given observed conditions.
    ///
    /// Never fails: when the solar geometry rejects the coordinates the
    /// engine degrades to the month-average table instead of propagating
    /// the error. The result is non-negative and rounded to one decimal.
    pub fn estimate(
        &self,
        point: GeoPoint,
        at: DateTime<FixedOffset>,
        conditions: &ObservedConditions,
    ) -> f64 {
        match solar::solar_position(point, at) {
            Ok(sun) => {
                let base = base::clear_sky_uv(&self.params, sun.zenith_deg, at);
                let cloud = cloud::cloud_factor(
                    conditions.cloud_cover_pct,
                    conditions.description.as_deref(),
                );
                let regional = regional::regional_factor(
                    &self.params,
                    point,
                    at,
                    conditions.temperature_c,
                );
                log::debug!(
                    "zenith {:.2}, base {base:.2}, cloud {cloud:.3}, regional {regional:.3}",
                    sun.zenith_deg
                );

                round_to_tenth((base * cloud * regional).max(0.0))
            }
            Err(err) => {
                log::warn!("solar geometry unavailable ({err}); using month-average fallback");
                self.monthly_fallback(at, conditions)
            }
        }
    }

    /// [`estimate`](Self::estimate) plus risk classification, packaged for
    /// the UI layer.
    pub fn assess(
        &self,
        point: GeoPoint,
        at: DateTime<FixedOffset>,
        conditions: &ObservedConditions,
        table: &RiskTable,
    ) -> UvIndexResult {
        let value = self.estimate(point, at, conditions);
        let band = table.classify(value);

        UvIndexResult {
            value,
            category: band.category,
            color: band.color,
            recommendation: band.recommendation.to_string(),
        }
    }

    /// Degraded path: month-indexed average damped by a simplified
    /// cloud/rain penalty. Different math from the primary path on
    /// purpose; it has no solar position to work from.
    fn monthly_fallback(&self, at: DateTime<FixedOffset>, conditions: &ObservedConditions) -> f64 {
        let average = self.params.monthly_average_uv[at.month0() as usize];

        let raining = conditions
            .description
            .as_deref()
            .is_some_and(cloud::suggests_rain);
        let reduction = if raining || conditions.cloud_cover_pct >= 90.0 {
            0.95
        } else {
            0.7 * conditions.cloud_cover_pct / 100.0
        };

        round_to_tenth(average * (1.0 - reduction))
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
