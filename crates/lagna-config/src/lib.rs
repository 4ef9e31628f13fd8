use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const BODY_NAMES: &[&str] = &[
    "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn",
];

#[derive(Debug, Clone, PartialEq)]
pub struct LagnaSettings {
    pub log_level: String,
    pub ephemeris: EphemerisSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EphemerisSettings {
    /// Fixed values served for every instant.
    Static(SnapshotSettings),
    /// Swiss Ephemeris data files; `None` defers to SWISS_EPHEMERIS_PATH.
    Swiss { path: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapshotSettings {
    #[serde(default)]
    pub sidereal_time_hours: Option<f64>,
    #[serde(default)]
    pub obliquity_deg: Option<f64>,
    /// Lowercase body name -> ecliptic longitude in degrees
    #[serde(default)]
    pub bodies: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingToml {
    #[serde(default = "default_log_level")]
    level: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default = "default_provider")]
    provider: String,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    snapshot: Option<SnapshotSettings>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> String {
    "static".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    logging: Option<LoggingToml>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
}

/// Try the usual relative locations for `configs/lagna.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/lagna.toml", "../../configs/lagna.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load lagna.toml from {:?}", paths);
}

/// Load settings from `path`, or from the default locations when `None`.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<LagnaSettings> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display()))?,
        None => read_config_toml_text()?,
    };
    parse_settings(&text)
}

pub fn parse_settings(text: &str) -> anyhow::Result<LagnaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse lagna.toml: {e}"))?;

    let log_level = root
        .logging
        .map(|l| l.level)
        .unwrap_or_else(default_log_level);

    let EphemerisToml {
        provider,
        path,
        snapshot,
    } = root.ephemeris.ok_or_else(|| {
        anyhow::anyhow!(
            "Missing [ephemeris] config in lagna.toml (needs provider = \"static\" or \"swiss\")"
        )
    })?;

    let ephemeris = match provider.to_lowercase().as_str() {
        "static" => {
            let snapshot = snapshot.ok_or_else(|| {
                anyhow::anyhow!(
                    "ephemeris.provider is \"static\" but no [ephemeris.snapshot] table was given"
                )
            })?;
            validate_snapshot(&snapshot)?;
            EphemerisSettings::Static(snapshot)
        }
        "swiss" => {
            if let Some(p) = &path {
                if !p.exists() {
                    anyhow::bail!("ephemeris.path does not exist: {}", p.display());
                }
            }
            EphemerisSettings::Swiss { path }
        }
        other => anyhow::bail!(
            "Unknown ephemeris.provider {:?} (expected \"static\" or \"swiss\")",
            other
        ),
    };

    Ok(LagnaSettings {
        log_level,
        ephemeris,
    })
}

fn validate_snapshot(snapshot: &SnapshotSettings) -> anyhow::Result<()> {
    for name in snapshot.bodies.keys() {
        if !BODY_NAMES.contains(&name.to_lowercase().as_str()) {
            anyhow::bail!(
                "Unknown body {:?} in [ephemeris.snapshot.bodies]; expected one of {:?}",
                name,
                BODY_NAMES
            );
        }
    }
    if let Some(hours) = snapshot.sidereal_time_hours {
        if !(0.0..24.0).contains(&hours) {
            anyhow::bail!("ephemeris.snapshot.sidereal_time_hours must be in [0, 24), got {hours}");
        }
    }
    Ok(())
}
