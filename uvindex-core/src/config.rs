use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::estimate::ModelParams;
use crate::model::GeoPoint;

/// The observation site: where the estimate is computed and which time
/// zone its civil clock runs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name, e.g. "America/Detroit". Resolved by the CLI; the
    /// engine itself only sees offset-carrying instants.
    pub timezone: String,
    /// ZIP code used for the EPA hourly UV reference lookup.
    pub zip_code: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Livonia, Michigan".to_string(),
            latitude: 42.3834,
            longitude: -83.3527,
            timezone: "America/Detroit".to_string(),
            zip_code: "48154".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Contact string sent in outbound User-Agent headers; api.weather.gov
    /// rejects anonymous clients.
    pub contact: Option<String>,

    pub site: SiteConfig,

    /// Model tuning overrides. Defaults describe the Livonia calibration.
    pub model: ModelParams,
}

impl Config {
    /// Load config from disk, or return the defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "uvindex", "uvindex-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// User-Agent header for outbound provider requests.
    pub fn user_agent(&self) -> String {
        match self.contact.as_deref() {
            Some(contact) => format!("uvindex-cli/0.1 ({contact})"),
            None => "uvindex-cli/0.1 (unconfigured)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_livonia_site() {
        let cfg = Config::default();
        assert_eq!(cfg.site.name, "Livonia, Michigan");
        assert_eq!(cfg.site.point(), GeoPoint::new(42.3834, -83.3527));
        assert_eq!(cfg.site.timezone, "America/Detroit");
        assert_eq!(cfg.site.zip_code, "48154");
        assert_eq!(cfg.model.uv_max, 11.0);
    }

    #[test]
    fn toml_round_trip_preserves_the_config() {
        let mut cfg = Config::default();
        cfg.contact = Some("ops@example.com".to_string());
        cfg.site.name = "Ann Arbor, Michigan".to_string();
        cfg.model.elevation_m = 260.0;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed: Config = toml::from_str("contact = \"me@example.com\"\n").expect("parse");
        assert_eq!(parsed.contact.as_deref(), Some("me@example.com"));
        assert_eq!(parsed.site, SiteConfig::default());
        assert_eq!(parsed.model, ModelParams::default());
    }

    #[test]
    fn partial_site_table_keeps_remaining_defaults() {
        let parsed: Config =
            toml::from_str("[site]\nname = \"Detroit, Michigan\"\n").expect("parse");
        assert_eq!(parsed.site.name, "Detroit, Michigan");
        assert_eq!(parsed.site.zip_code, "48154");
    }

    #[test]
    fn user_agent_includes_the_contact_when_set() {
        let mut cfg = Config::default();
        assert!(cfg.user_agent().contains("unconfigured"));

        cfg.contact = Some("me@example.com".to_string());
        assert_eq!(cfg.user_agent(), "uvindex-cli/0.1 (me@example.com)");
    }
}
