use anyhow::{Context, anyhow, ensure};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};

use uvindex_core::{
    Config, ObservedConditions, RiskTable, UvEstimator, UvIndexResult, WeatherSnapshot,
    provider::{conditions_provider, reference_provider},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "uvindex", version, about = "UV index estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the current UV index from live weather observations.
    Show {
        /// Skip the EPA reference UV lookup.
        #[arg(long)]
        no_reference: bool,
    },

    /// Estimate the UV index for explicit conditions, without any network
    /// calls.
    Estimate {
        /// Cloud cover percentage (0-100).
        #[arg(long, default_value_t = 0.0)]
        cloud_cover: f64,

        /// Weather description, e.g. "partly cloudy" or "thunderstorm".
        #[arg(long)]
        description: Option<String>,

        /// Air temperature in Celsius.
        #[arg(long)]
        temperature: Option<f64>,

        /// Local civil time at the site, e.g. "2025-07-01T12:30".
        /// Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Interactively configure the site and contact details.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { no_reference } => show(no_reference).await,
            Command::Estimate { cloud_cover, description, temperature, at } => {
                estimate_offline(cloud_cover, description, temperature, at)
            }
            Command::Configure => configure(),
        }
    }
}

async fn show(no_reference: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let tz = site_timezone(&config)?;
    let now = Utc::now().with_timezone(&tz);

    let engine = UvEstimator::new(config.model.clone());
    let table = RiskTable::default();

    let provider = conditions_provider(&config);
    let snapshot = match provider.fetch_current(config.site.point()).await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            eprintln!("Weather data unavailable: {err:#}");
            eprintln!("Falling back to clear-sky conditions.\n");
            None
        }
    };

    let conditions =
        snapshot.as_ref().map_or_else(ObservedConditions::default, WeatherSnapshot::conditions);

    let result =
        engine.assess(config.site.point(), now.fixed_offset(), &conditions, &table);

    println!("{} — {}", config.site.name, now.format("%Y-%m-%d %H:%M %Z"));
    println!();
    if let Some(snapshot) = &snapshot {
        print_snapshot(snapshot);
        println!();
    }
    print_result(&result);

    if !no_reference {
        match reference_provider(&config).fetch_reference().await {
            Ok(Some(reference)) => {
                println!();
                println!("EPA reference (ZIP {}): {reference:.1}", config.site.zip_code);
            }
            Ok(None) => {
                println!();
                println!("EPA reference (ZIP {}): no data", config.site.zip_code);
            }
            Err(err) => eprintln!("EPA reference unavailable: {err:#}"),
        }
    }

    Ok(())
}

fn estimate_offline(
    cloud_cover: f64,
    description: Option<String>,
    temperature: Option<f64>,
    at: Option<String>,
) -> anyhow::Result<()> {
    ensure!(
        (0.0..=100.0).contains(&cloud_cover),
        "Cloud cover must be between 0 and 100, got {cloud_cover}"
    );

    let config = Config::load()?;
    let tz = site_timezone(&config)?;
    let at = match at {
        Some(text) => parse_local(&text, tz)?,
        None => Utc::now().with_timezone(&tz).fixed_offset(),
    };

    let conditions = ObservedConditions {
        cloud_cover_pct: cloud_cover,
        description,
        temperature_c: temperature,
    };

    let engine = UvEstimator::new(config.model.clone());
    let result = engine.assess(config.site.point(), at, &conditions, &RiskTable::default());

    println!("{} — {}", config.site.name, at.format("%Y-%m-%d %H:%M"));
    println!();
    print_result(&result);

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let contact = Text::new("Contact email for outbound User-Agent headers:")
        .with_initial_value(config.contact.as_deref().unwrap_or(""))
        .prompt()?;
    config.contact = if contact.trim().is_empty() { None } else { Some(contact.trim().to_string()) };

    config.site.name = Text::new("Site name:")
        .with_initial_value(&config.site.name)
        .prompt()?;

    config.site.latitude = CustomType::<f64>::new("Latitude:")
        .with_default(config.site.latitude)
        .with_error_message("Enter a decimal latitude, e.g. 42.3834")
        .prompt()?;

    config.site.longitude = CustomType::<f64>::new("Longitude:")
        .with_default(config.site.longitude)
        .with_error_message("Enter a decimal longitude, e.g. -83.3527")
        .prompt()?;

    config
        .site
        .point()
        .validate()
        .map_err(|err| anyhow!("Invalid coordinates: {err}"))?;

    let timezone = Text::new("IANA time zone:")
        .with_initial_value(&config.site.timezone)
        .prompt()?;
    timezone
        .parse::<Tz>()
        .map_err(|err| anyhow!("Unknown time zone '{timezone}': {err}"))?;
    config.site.timezone = timezone;

    config.site.zip_code = Text::new("ZIP code for the EPA reference lookup:")
        .with_initial_value(&config.site.zip_code)
        .prompt()?;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}

fn site_timezone(config: &Config) -> anyhow::Result<Tz> {
    config
        .site
        .timezone
        .parse::<Tz>()
        .map_err(|err| anyhow!("Unknown time zone '{}': {err}", config.site.timezone))
}

/// Parse a local civil time like "2025-07-01T12:30" in the site's zone.
fn parse_local(text: &str, tz: Tz) -> anyhow::Result<DateTime<FixedOffset>> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

    let naive = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .with_context(|| format!("Could not parse '{text}' as a local date/time"))?;

    let local = naive
        .and_local_timezone(tz)
        .single()
        .ok_or_else(|| anyhow!("'{text}' is ambiguous or nonexistent in {tz}"))?;

    Ok(local.fixed_offset())
}

fn print_snapshot(snapshot: &WeatherSnapshot) {
    let mut parts = Vec::new();
    if let Some(description) = &snapshot.description {
        parts.push(description.clone());
    }
    if let Some(t) = snapshot.temperature_c {
        parts.push(format!("{t:.1}\u{b0}C"));
    }
    if let Some(h) = snapshot.humidity_pct {
        parts.push(format!("humidity {h:.0}%"));
    }
    match (&snapshot.wind_direction, &snapshot.wind_speed) {
        (Some(dir), Some(speed)) => parts.push(format!("wind {dir} {speed}")),
        (None, Some(speed)) => parts.push(format!("wind {speed}")),
        _ => {}
    }
    parts.push(format!("cloud cover {:.0}%", snapshot.cloud_cover_pct));

    println!("Conditions ({}): {}", snapshot.provider, parts.join(", "));
}

fn print_result(result: &UvIndexResult) {
    println!("UV index: {:.1} ({}, {})", result.value, result.category, result.color);
    println!("{}", result.recommendation);
}
