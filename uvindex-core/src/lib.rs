//! Core library for the `uvindex` CLI.
//!
//! This crate defines:
//! - The UV estimation engine (solar geometry, clear-sky base model,
//!   cloud and regional adjustments, month-average fallback)
//! - Risk classification of the estimated index
//! - Configuration handling for the observation site
//! - Abstraction over weather-data providers (NWS conditions, EPA
//!   reference UV)
//!
//! It is used by `uvindex-cli`, but can also be reused by other binaries
//! or services. The estimation engine is pure and synchronous; only the
//! provider layer performs I/O.

pub mod config;
pub mod estimate;
pub mod model;
pub mod provider;
pub mod risk;
pub mod solar;

pub use config::{Config, SiteConfig};
pub use estimate::{ModelParams, UvEstimator};
pub use model::{GeoPoint, ObservedConditions, UvIndexResult, WeatherSnapshot};
pub use provider::{ConditionsProvider, ReferenceUvProvider};
pub use risk::{RiskBand, RiskCategory, RiskColor, RiskTable};
pub use solar::{GeometryError, SolarPosition, solar_position};
