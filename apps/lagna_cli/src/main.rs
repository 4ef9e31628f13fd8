use std::path::PathBuf;

use clap::Parser;
use lagna::{compute_chart, BirthInput, Chart, ChartError, EphemerisProvider, StaticEphemeris};
use lagna_config::{EphemerisSettings, LagnaSettings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    /// Local birth date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Local birth time, HH:MM or HH:MM:SS
    #[arg(long)]
    time: String,

    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// UTC offset in hours (5.5 for IST)
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    tz: f64,

    /// Path to lagna.toml (defaults to configs/lagna.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

fn build_provider(settings: &LagnaSettings) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    match &settings.ephemeris {
        EphemerisSettings::Static(snapshot) => {
            let table = StaticEphemeris::from_named(
                snapshot.sidereal_time_hours,
                snapshot.obliquity_deg,
                snapshot.bodies.iter().map(|(name, lon)| (name.as_str(), *lon)),
            )?;
            Ok(Box::new(table))
        }
        #[cfg(feature = "swisseph")]
        EphemerisSettings::Swiss { path } => {
            Ok(Box::new(lagna::SwissEphemeris::new(path.clone())?))
        }
        #[cfg(not(feature = "swisseph"))]
        EphemerisSettings::Swiss { .. } => {
            anyhow::bail!(
                "ephemeris.provider = \"swiss\" needs lagna_cli built with --features swisseph"
            )
        }
    }
}

/// Compute the chart, logging each violation and carrying the full list in the error.
fn chart_for(input: &BirthInput, provider: &dyn EphemerisProvider) -> anyhow::Result<Chart> {
    match compute_chart(input, provider) {
        Ok(chart) => Ok(chart),
        Err(ChartError::ValidationFailed(errors)) => {
            for violation in errors.violations() {
                log::error!("{}", violation);
            }
            Err(ChartError::ValidationFailed(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = lagna_config::load_settings(args.config.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&settings.log_level),
    )
    .init();

    let provider = build_provider(&settings)?;
    let input = BirthInput::new(args.date, args.time, args.lat, args.lon, args.tz);

    let chart = chart_for(&input, provider.as_ref())?;

    if chart.is_degraded() {
        log::warn!("Chart is degraded; see notes on unavailable entries");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&chart)?
    } else {
        serde_json::to_string(&chart)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagna::Body;

    fn provider() -> StaticEphemeris {
        StaticEphemeris::new()
            .with_sidereal_time(10.0)
            .with_obliquity(23.44)
            .with_body(Body::Sun, 50.3)
    }

    #[test]
    fn test_rejection_lists_every_violation() {
        let input = BirthInput::new("", "25:00", 95.0, 77.59, 5.5);
        let err = chart_for(&input, &provider()).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("date is required"), "got {message}");
        assert!(message.contains("25:00"), "got {message}");
        assert!(message.contains("latitude"), "got {message}");
    }

    #[test]
    fn test_valid_input_yields_chart() {
        let input = BirthInput::new("1990-05-21", "14:35", 12.97, 77.59, 5.5);
        let chart = chart_for(&input, &provider()).unwrap();
        assert_eq!(chart.houses().len(), 12);
    }
}
