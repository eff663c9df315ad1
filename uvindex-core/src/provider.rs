//! External collaborators: live weather observations and the EPA
//! reference UV value. The estimation engine never performs I/O itself;
//! it only consumes these providers' already-resolved outputs.

use crate::{Config, model::GeoPoint, model::WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod epa;
pub mod nws;

/// Source of current observed conditions at a point.
#[async_trait]
pub trait ConditionsProvider: Send + Sync + Debug {
    async fn fetch_current(&self, point: GeoPoint) -> anyhow::Result<WeatherSnapshot>;
}

/// Source of an authoritative UV index value, used for display-side
/// comparison only — never fed back into the engine.
#[async_trait]
pub trait ReferenceUvProvider: Send + Sync + Debug {
    async fn fetch_reference(&self) -> anyhow::Result<Option<f64>>;
}

/// Construct the conditions provider for the configured site.
pub fn conditions_provider(config: &Config) -> Box<dyn ConditionsProvider> {
    Box::new(nws::NwsProvider::new(config.user_agent()))
}

/// Construct the reference-UV provider for the configured site.
pub fn reference_provider(config: &Config) -> Box<dyn ReferenceUvProvider> {
    Box::new(epa::EpaUvProvider::new(config.user_agent(), config.site.zip_code.clone()))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
