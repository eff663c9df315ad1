use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;

use super::{ReferenceUvProvider, truncate_body};

/// EPA Envirofacts hourly UV provider, keyed by ZIP code.
///
/// Returns the most recent hourly reading, which the UI shows next to the
/// local estimate. The service sometimes encodes values as strings, so
/// parsing is tolerant.
#[derive(Debug, Clone)]
pub struct EpaUvProvider {
    user_agent: String,
    zip_code: String,
    http: Client,
}

impl EpaUvProvider {
    pub fn new(user_agent: String, zip_code: String) -> Self {
        Self { user_agent, zip_code, http: Client::new() }
    }
}

#[async_trait]
impl ReferenceUvProvider for EpaUvProvider {
    async fn fetch_reference(&self) -> Result<Option<f64>> {
        let url =
            format!("https://data.epa.gov/efservice/UV_HOURLY/ZIP/{}/JSON", self.zip_code);

        let res = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .context("Failed to send request to EPA (hourly UV)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read EPA hourly UV response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "EPA hourly UV request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let records: Vec<UvHourlyRecord> =
            serde_json::from_str(&body).context("Failed to parse EPA hourly UV JSON")?;

        Ok(latest_uv_value(&records))
    }
}

#[derive(Debug, Deserialize)]
struct UvHourlyRecord {
    #[serde(rename = "UV_VALUE")]
    uv_value: Option<serde_json::Value>,
}

/// Most recent record's UV value, whether the service sent it as a number
/// or a string.
fn latest_uv_value(records: &[UvHourlyRecord]) -> Option<f64> {
    let value = records.last()?.uv_value.as_ref()?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_uv_values_parse() {
        let body = r#"[
            { "ZIP": 48154, "DATE_TIME": "2025/07/01 11 AM", "UV_VALUE": 6 },
            { "ZIP": 48154, "DATE_TIME": "2025/07/01 12 PM", "UV_VALUE": 8 }
        ]"#;

        let records: Vec<UvHourlyRecord> = serde_json::from_str(body).expect("parse");
        assert_eq!(latest_uv_value(&records), Some(8.0));
    }

    #[test]
    fn string_uv_values_parse() {
        let body = r#"[ { "UV_VALUE": "7.5" } ]"#;

        let records: Vec<UvHourlyRecord> = serde_json::from_str(body).expect("parse");
        assert_eq!(latest_uv_value(&records), Some(7.5));
    }

    #[test]
    fn empty_payload_yields_no_reference() {
        let records: Vec<UvHourlyRecord> = serde_json::from_str("[]").expect("parse");
        assert_eq!(latest_uv_value(&records), None);
    }

    #[test]
    fn missing_or_junk_values_yield_no_reference() {
        let body = r#"[ { "ZIP": 48154 }, { "UV_VALUE": "n/a" } ]"#;

        let records: Vec<UvHourlyRecord> = serde_json::from_str(body).expect("parse");
        assert_eq!(latest_uv_value(&records), None);
    }
}
