// Remote JSON season source.
//
// Fetches league-wide season stats from a configurable HTTP API:
//   GET {base_url}/pitching?season=YYYY
//   GET {base_url}/batting?season=YYYY
// Both endpoints return a JSON array of row objects. Retry/backoff is the
// deployment's concern (a proxy or the caller); this client makes one
// attempt per call.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderError, SeasonSource};
use crate::stats::batting::PlayerBattingRow;
use crate::stats::risk::PitcherRateRow;

// ---------------------------------------------------------------------------
// Wire structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WirePitching {
    name: String,
    team: String,
    era: f64,
    whip: f64,
    hr_per_9: f64,
    #[serde(default)]
    k_per_9: f64,
    #[serde(default)]
    bb_per_9: f64,
    #[serde(default)]
    gb_pct: f64,
    #[serde(default)]
    fb_pct: f64,
}

#[derive(Debug, Deserialize)]
struct WireBatting {
    name: String,
    team: String,
    hits: u32,
    at_bats: u32,
    walks: u32,
    #[serde(default)]
    hit_by_pitch: u32,
    #[serde(default)]
    sacrifice_flies: u32,
    doubles: u32,
    triples: u32,
    home_runs: u32,
}

fn pitching_row(wire: WirePitching) -> PitcherRateRow {
    PitcherRateRow {
        name: wire.name,
        team: wire.team,
        era: wire.era,
        whip: wire.whip,
        hr_per_9: wire.hr_per_9,
        k_per_9: wire.k_per_9,
        bb_per_9: wire.bb_per_9,
        gb_pct: wire.gb_pct,
        fb_pct: wire.fb_pct,
    }
}

fn batting_row(wire: WireBatting) -> PlayerBattingRow {
    PlayerBattingRow {
        name: wire.name,
        team: wire.team,
        hits: wire.hits,
        at_bats: wire.at_bats,
        walks: wire.walks,
        hit_by_pitch: wire.hit_by_pitch,
        sacrifice_flies: wire.sacrifice_flies,
        doubles: wire.doubles,
        triples: wire.triples,
        home_runs: wire.home_runs,
    }
}

// ---------------------------------------------------------------------------
// RemoteSource
// ---------------------------------------------------------------------------

/// Season source backed by an HTTP JSON API.
pub struct RemoteSource {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        RemoteSource {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        year: u16,
    ) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, year, "fetching season data");
        let response = self
            .http
            .get(&url)
            .query(&[("season", year)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Http {
                url: url.clone(),
                source: e,
            })?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ProviderError::Http { url, source: e })
    }
}

#[async_trait]
impl SeasonSource for RemoteSource {
    async fn pitching(&self, year: u16) -> Result<Vec<PitcherRateRow>, ProviderError> {
        let wire: Vec<WirePitching> = self.fetch_json("pitching", year).await?;
        Ok(wire.into_iter().map(pitching_row).collect())
    }

    async fn batting(&self, year: u16) -> Result<Vec<PlayerBattingRow>, ProviderError> {
        let wire: Vec<WireBatting> = self.fetch_json("batting", year).await?;
        Ok(wire.into_iter().map(batting_row).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
