// Configuration loading and parsing (config/app.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::stats::risk::RiskMetric;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// app.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire app.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    season: SeasonSection,
    risk: RiskSection,
    cache: CacheSection,
    source: SourceSection,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSection {
    /// Season year to load on startup. When omitted, the current UTC year
    /// is used (matching a live in-progress season).
    #[serde(default)]
    pub year: Option<u16>,
    /// Preferred default opponent team abbreviation. Falls back to the
    /// first team in the data when absent from the fetched season.
    pub default_opponent: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RiskSection {
    /// Metric column names, resolved against the known risk metric set.
    metrics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CacheSection {
    ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    /// Either "csv" (local season exports) or "remote" (HTTP JSON API).
    pub kind: String,
    #[serde(default)]
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub pitching: String,
    pub batting: String,
    /// Optional strike-zone heat-map data file (JSON).
    #[serde(default)]
    pub zones: Option<String>,
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: SeasonSection,
    /// Resolved, typed risk metric set (validated non-empty).
    pub risk_metrics: Vec<RiskMetric>,
    pub cache_ttl_secs: u64,
    pub source: SourceSection,
    pub data_paths: DataPaths,
}

impl Config {
    /// The season year to load: configured value, or the current UTC year.
    pub fn season_year(&self) -> u16 {
        use chrono::Datelike;
        self.season
            .year
            .unwrap_or_else(|| chrono::Utc::now().year() as u16)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/app.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let app_path = base_dir.join("config").join("app.toml");
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    let risk_metrics = resolve_metrics(&app_file.risk.metrics)?;

    let config = Config {
        season: app_file.season,
        risk_metrics,
        cache_ttl_secs: app_file.cache.ttl_secs,
        source: app_file.source,
        data_paths: app_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure the config file exists by copying missing files from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory. Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Resolve configured metric names against the known risk metric set.
fn resolve_metrics(names: &[String]) -> Result<Vec<RiskMetric>, ConfigError> {
    names
        .iter()
        .map(|name| {
            RiskMetric::from_name(name).ok_or_else(|| ConfigError::ValidationError {
                field: "risk.metrics".into(),
                message: format!("unknown metric name `{name}` (expected ERA, WHIP, HR/9)"),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Earliest season with league statistics worth fetching.
pub const FIRST_SEASON: u16 = 1871;

fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Some(year) = config.season.year {
        if year < FIRST_SEASON {
            return Err(ConfigError::ValidationError {
                field: "season.year".into(),
                message: format!("must be {FIRST_SEASON} or later, got {year}"),
            });
        }
    }

    if config.season.default_opponent.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "season.default_opponent".into(),
            message: "must not be empty".into(),
        });
    }

    if config.risk_metrics.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "risk.metrics".into(),
            message: "must name at least one metric".into(),
        });
    }

    match config.source.kind.as_str() {
        "csv" => {}
        "remote" => {
            if config.source.base_url.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: "source.base_url".into(),
                    message: "required when source.kind = \"remote\"".into(),
                });
            }
        }
        other => {
            return Err(ConfigError::ValidationError {
                field: "source.kind".into(),
                message: format!("must be \"csv\" or \"remote\", got `{other}`"),
            });
        }
    }

    if config.source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "source.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
