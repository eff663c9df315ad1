//! Clear-sky UV model: zenith-angle power law shaped by seasonal and
//! time-of-day curves, with a fixed elevation boost.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use super::ModelParams;

/// Local clock hour the time-of-day bell is centered on, approximating
/// solar noon for the deployment region.
const SOLAR_NOON_HOURS: f64 = 12.5;

/// Zenith angle at which the power law hands over to the linear horizon
/// fallback.
const HORIZON_HANDOVER_DEG: f64 = 75.0;

/// Clear-sky UV index for the given solar zenith angle and local civil
/// instant. Returns 0 when the sun is below the horizon.
pub(crate) fn clear_sky_uv(
    params: &ModelParams,
    zenith_deg: f64,
    at: DateTime<FixedOffset>,
) -> f64 {
    if zenith_deg >= 90.0 {
        return 0.0;
    }

    let uv = params.uv_max
        * zenith_attenuation(params, zenith_deg)
        * seasonal_factor(at)
        * time_of_day_factor(at)
        * altitude_boost(params);

    uv.max(0.0)
}

/// Sinusoid over the day of year peaking at the northern summer solstice.
///
/// The year length intentionally uses the plain `% 4` leap test the model
/// was calibrated with; century years drift the season by a day.
fn seasonal_factor(at: DateTime<FixedOffset>) -> f64 {
    let day_of_year = f64::from(at.ordinal());
    let year_length = if at.year() % 4 == 0 { 366.0 } else { 365.0 };

    0.8 + 0.5
        * ((day_of_year / year_length) * 2.0 * std::f64::consts::PI
            - std::f64::consts::FRAC_PI_2)
            .sin()
}

/// Cosine-squared bell centered on local solar noon, tapering to zero at
/// six hours either side and zero beyond.
fn time_of_day_factor(at: DateTime<FixedOffset>) -> f64 {
    let hours = f64::from(at.hour()) + f64::from(at.minute()) / 60.0;
    let noon_offset = (hours - SOLAR_NOON_HOURS).abs();

    if noon_offset > 6.0 {
        0.0
    } else {
        (noon_offset * std::f64::consts::PI / 12.0).cos().powi(2)
    }
}

/// `cos(z)^alpha` for most of the sky; near the horizon the power law is
/// replaced by a conservative linear ramp to keep the tail well behaved.
fn zenith_attenuation(params: &ModelParams, zenith_deg: f64) -> f64 {
    if zenith_deg < HORIZON_HANDOVER_DEG {
        zenith_deg.to_radians().cos().powf(params.zenith_exponent)
    } else {
        params.horizon_coefficient * ((90.0 - zenith_deg) / 15.0)
    }
}

/// Roughly +1% UV per 100 m of site elevation.
fn altitude_boost(params: &ModelParams) -> f64 {
    1.0 + (params.elevation_m / 1000.0) * 0.1
}
