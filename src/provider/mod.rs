// Season statistics providers: local CSV exports and a remote JSON API.
//
// The core stats engine never fetches anything itself; it is handed complete
// row collections. A `SeasonSource` resolves "all rows for year Y" and the
// app layer filters by team and caches the results.

pub mod csv;
pub mod remote;

use std::path::Path;

use async_trait::async_trait;

use crate::config::Config;
use crate::protocol::ZoneGrid;
use crate::stats::batting::PlayerBattingRow;
use crate::stats::risk::PitcherRateRow;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        source: ::csv::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("invalid zone data in {path}: {source}")]
    Zone {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// SeasonSource trait
// ---------------------------------------------------------------------------

/// A provider of season-level statistics, keyed by year. Implementations
/// return league-wide rows with qualification thresholds bypassed (every
/// player included); team filtering happens downstream.
#[async_trait]
pub trait SeasonSource: Send + Sync {
    /// All pitcher rate rows for the given season.
    async fn pitching(&self, year: u16) -> Result<Vec<PitcherRateRow>, ProviderError>;

    /// All player batting rows for the given season.
    async fn batting(&self, year: u16) -> Result<Vec<PlayerBattingRow>, ProviderError>;
}

/// Build the configured season source.
pub fn source_from_config(config: &Config) -> Box<dyn SeasonSource> {
    match config.source.kind.as_str() {
        "remote" => Box::new(remote::RemoteSource::new(
            config.source.base_url.clone(),
            std::time::Duration::from_secs(config.source.timeout_secs),
        )),
        // Config validation only admits "csv" and "remote".
        _ => Box::new(csv::CsvSource::new(
            config.data_paths.pitching.clone(),
            config.data_paths.batting.clone(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Zone data loading
// ---------------------------------------------------------------------------

/// Load a strike-zone heat-map grid from a JSON file.
pub fn load_zone_grid(path: &Path) -> Result<ZoneGrid, ProviderError> {
    let text = std::fs::read_to_string(path).map_err(|e| ProviderError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ProviderError::Zone {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
