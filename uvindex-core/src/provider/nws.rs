use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;

use crate::model::{GeoPoint, WeatherSnapshot};

use super::{ConditionsProvider, truncate_body};

/// Cloud cover estimated from the short-forecast wording, first match
/// wins. "Mostly Cloudy" lands on the `cloudy` rule and "Mostly Clear" on
/// the `clear` rule, so the partial terms must come before the bare ones.
const CLOUD_COVER_RULES: &[(&str, f64)] = &[
    ("clear", 0.0),
    ("partly cloudy", 50.0),
    ("partly sunny", 50.0),
    ("overcast", 100.0),
    ("cloudy", 100.0),
];

/// National Weather Service (api.weather.gov) conditions provider.
///
/// Two-step fetch: the points endpoint resolves the gridpoint forecast
/// URL, whose first period describes current conditions. NWS rejects
/// requests without an identifying User-Agent.
#[derive(Debug, Clone)]
pub struct NwsProvider {
    user_agent: String,
    http: Client,
}

impl NwsProvider {
    pub fn new(user_agent: String) -> Self {
        Self { user_agent, http: Client::new() }
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .with_context(|| format!("Failed to send request to NWS ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read NWS {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "NWS {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl ConditionsProvider for NwsProvider {
    async fn fetch_current(&self, point: GeoPoint) -> Result<WeatherSnapshot> {
        let points_url =
            format!("https://api.weather.gov/points/{},{}", point.latitude, point.longitude);
        let body = self.get_text(&points_url, "points").await?;
        let points: PointsResponse =
            serde_json::from_str(&body).context("Failed to parse NWS points JSON")?;

        let body = self.get_text(&points.properties.forecast, "forecast").await?;
        let forecast: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse NWS forecast JSON")?;

        let period = forecast
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("NWS forecast contained no periods"))?;

        log::debug!("NWS period: {period:?}");
        Ok(snapshot_from_period(period))
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    temperature: Option<f64>,
    temperature_unit: Option<String>,
    short_forecast: Option<String>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    relative_humidity: Option<QuantitativeValue>,
}

#[derive(Debug, Deserialize)]
struct QuantitativeValue {
    value: Option<f64>,
}

fn snapshot_from_period(period: ForecastPeriod) -> WeatherSnapshot {
    let temperature_c = period.temperature.map(|t| {
        match period.temperature_unit.as_deref() {
            // NWS forecast periods report Fahrenheit.
            Some("F") | None => fahrenheit_to_celsius(t),
            _ => t,
        }
    });

    let cloud_cover_pct = period
        .short_forecast
        .as_deref()
        .map_or(0.0, cloud_cover_from_forecast);

    WeatherSnapshot {
        provider: "nws".to_string(),
        temperature_c,
        description: period.short_forecast,
        humidity_pct: period.relative_humidity.and_then(|q| q.value),
        wind_speed: period.wind_speed,
        wind_direction: period.wind_direction,
        cloud_cover_pct,
    }
}

fn cloud_cover_from_forecast(short_forecast: &str) -> f64 {
    let lowered = short_forecast.to_lowercase();
    CLOUD_COVER_RULES
        .iter()
        .find(|(term, _)| lowered.contains(term))
        .map_or(0.0, |(_, pct)| *pct)
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forecast_maps_to_cloud_cover() {
        assert_eq!(cloud_cover_from_forecast("Sunny"), 0.0);
        assert_eq!(cloud_cover_from_forecast("Clear"), 0.0);
        assert_eq!(cloud_cover_from_forecast("Mostly Clear"), 0.0);
        assert_eq!(cloud_cover_from_forecast("Partly Cloudy"), 50.0);
        assert_eq!(cloud_cover_from_forecast("Partly Sunny"), 50.0);
        assert_eq!(cloud_cover_from_forecast("Mostly Cloudy"), 100.0);
        assert_eq!(cloud_cover_from_forecast("Cloudy"), 100.0);
        assert_eq!(cloud_cover_from_forecast("Overcast"), 100.0);
        assert_eq!(cloud_cover_from_forecast("Slight Chance Showers"), 0.0);
    }

    #[test]
    fn fahrenheit_converts_to_celsius() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
        assert!((fahrenheit_to_celsius(75.0) - 23.888888888888889).abs() < 1e-12);
    }

    #[test]
    fn points_payload_parses() {
        let body = r#"{
            "properties": {
                "forecast": "https://api.weather.gov/gridpoints/DTX/33,39/forecast"
            }
        }"#;

        let parsed: PointsResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.properties.forecast.ends_with("/forecast"));
    }

    #[test]
    fn forecast_payload_becomes_a_snapshot() {
        let body = r#"{
            "properties": {
                "periods": [
                    {
                        "number": 1,
                        "name": "This Afternoon",
                        "temperature": 75,
                        "temperatureUnit": "F",
                        "windSpeed": "10 mph",
                        "windDirection": "NW",
                        "shortForecast": "Partly Cloudy",
                        "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 55 }
                    }
                ]
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("parse");
        let period = parsed.properties.periods.into_iter().next().expect("period");
        let snapshot = snapshot_from_period(period);

        assert_eq!(snapshot.provider, "nws");
        assert_eq!(snapshot.cloud_cover_pct, 50.0);
        assert_eq!(snapshot.description.as_deref(), Some("Partly Cloudy"));
        assert_eq!(snapshot.humidity_pct, Some(55.0));
        assert_eq!(snapshot.wind_speed.as_deref(), Some("10 mph"));
        assert!((snapshot.temperature_c.unwrap() - 23.888888888888889).abs() < 1e-12);
    }

    #[test]
    fn sparse_forecast_period_still_produces_a_snapshot() {
        let body = r#"{ "properties": { "periods": [ { "number": 1 } ] } }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("parse");
        let period = parsed.properties.periods.into_iter().next().expect("period");
        let snapshot = snapshot_from_period(period);

        assert_eq!(snapshot.cloud_cover_pct, 0.0);
        assert!(snapshot.temperature_c.is_none());
        assert!(snapshot.description.is_none());
    }
}
