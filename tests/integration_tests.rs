// Integration tests for the pitcher scouting dashboard.
//
// These tests exercise the full system end-to-end using the library crate's
// public API. They verify that the major subsystems (CSV loading, the
// aggregation and risk pipelines, the season cache, config loading, and the
// app orchestrator's command handling) work together correctly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pitch_scout::app::{self, AppState};
use pitch_scout::config::{Config, DataPaths, SeasonSection, SourceSection};
use pitch_scout::protocol::{FetchStatus, UiUpdate, UserCommand};
use pitch_scout::provider::csv::CsvSource;
use pitch_scout::provider::{self, ProviderError, SeasonSource};
use pitch_scout::stats::batting::{self, PlayerBattingRow};
use pitch_scout::stats::risk::{self, PitcherRateRow, DEFAULT_METRICS};

use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to project root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn fixture_config() -> Config {
    Config {
        season: SeasonSection {
            year: Some(2024),
            default_opponent: "LAD".into(),
        },
        risk_metrics: DEFAULT_METRICS.to_vec(),
        cache_ttl_secs: 3600,
        source: SourceSection {
            kind: "csv".into(),
            base_url: String::new(),
            timeout_secs: 10,
        },
        data_paths: DataPaths {
            pitching: format!("{FIXTURES}/pitching.csv"),
            batting: format!("{FIXTURES}/batting.csv"),
            zones: Some(format!("{FIXTURES}/zones.json")),
        },
    }
}

fn fixture_source() -> CsvSource {
    CsvSource::new(
        format!("{FIXTURES}/pitching.csv"),
        format!("{FIXTURES}/batting.csv"),
    )
}

async fn ready_state() -> (AppState, mpsc::Receiver<UiUpdate>) {
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let mut state = AppState::new(fixture_config(), Box::new(fixture_source()), ui_tx);
    state.initialize().await.expect("initial load should succeed");
    (state, ui_rx)
}

/// A season source that counts fetches, for cache behavior tests.
struct CountingSource {
    inner: CsvSource,
    pitching_calls: Arc<AtomicUsize>,
    batting_calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl SeasonSource for CountingSource {
    async fn pitching(&self, year: u16) -> Result<Vec<PitcherRateRow>, ProviderError> {
        self.pitching_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.pitching(year).await
    }

    async fn batting(&self, year: u16) -> Result<Vec<PlayerBattingRow>, ProviderError> {
        self.batting_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.batting(year).await
    }
}

// ===========================================================================
// CSV loading through the source trait
// ===========================================================================

#[tokio::test]
async fn csv_source_loads_fixture_files() {
    let source = fixture_source();

    let pitching = source.pitching(2024).await.unwrap();
    assert_eq!(pitching.len(), 5);
    assert!(pitching.iter().any(|r| r.name == "Logan Webb"));

    let batting = source.batting(2024).await.unwrap();
    assert_eq!(batting.len(), 4);
    assert!(batting.iter().any(|r| r.name == "Shohei Ohtani"));
}

#[test]
fn zone_grid_loads_from_fixture() {
    let grid =
        provider::load_zone_grid(std::path::Path::new(&format!("{FIXTURES}/zones.json")))
            .unwrap();
    assert!(approx_eq(grid.inner[1][0], 95.1, 1e-9));
    assert!(approx_eq(grid.corners[1], 78.5, 1e-9));
}

// ===========================================================================
// Stats pipeline on fixture data
// ===========================================================================

#[tokio::test]
async fn aggregation_pipeline_matches_hand_computed_totals() {
    let source = fixture_source();
    let batting = source.batting(2024).await.unwrap();
    let lad: Vec<PlayerBattingRow> =
        batting.into_iter().filter(|r| r.team == "LAD").collect();
    assert_eq!(lad.len(), 3);

    // Totals: H 527, AB 1732, BB 212, HBP 15, SF 13, 2B 101, 3B 11, HR 95
    let summary = batting::aggregate(&lad);
    assert!(approx_eq(summary.batting_average, 0.304, 1e-9));
    assert!(approx_eq(summary.on_base_percentage, 0.382, 1e-9));
    assert!(approx_eq(summary.slugging_percentage, 0.540, 1e-9));
}

#[tokio::test]
async fn risk_pipeline_scores_full_roster() {
    let source = fixture_source();
    let pitching = source.pitching(2024).await.unwrap();
    let roster: Vec<PitcherRateRow> =
        pitching.into_iter().filter(|r| r.team == "SFG").collect();
    assert_eq!(roster.len(), 3);

    let scores = risk::score(&roster, &DEFAULT_METRICS);
    assert_eq!(scores.len(), 3);
    for s in scores.values() {
        assert!((0.0..=1.0).contains(&s.score));
    }
    // Webb leads every scored column, Harrison trails in ERA and HR/9
    assert!(scores["Logan Webb"].score < scores["Kyle Harrison"].score);

    let err = risk::lookup(&scores, "Tyler Glasnow").unwrap_err();
    assert!(err.to_string().contains("Tyler Glasnow"));
}

// ===========================================================================
// App orchestrator command flow
// ===========================================================================

#[tokio::test]
async fn startup_pushes_status_and_snapshot() {
    let (_state, mut ui_rx) = ready_state().await;

    let mut saw_loading = false;
    let mut saw_ready = false;
    let mut snapshot = None;
    while let Ok(update) = ui_rx.try_recv() {
        match update {
            UiUpdate::FetchStatus(FetchStatus::Loading) => saw_loading = true,
            UiUpdate::FetchStatus(FetchStatus::Ready) => saw_ready = true,
            UiUpdate::Snapshot(s) => snapshot = Some(*s),
            _ => {}
        }
    }
    assert!(saw_loading && saw_ready);

    let snapshot = snapshot.expect("startup should push a snapshot");
    assert_eq!(snapshot.year, 2024);
    assert_eq!(snapshot.teams, vec!["LAD".to_string(), "SFG".to_string()]);
}

#[tokio::test]
async fn zone_data_is_pushed_when_configured() {
    let (_state, mut ui_rx) = ready_state().await;

    let mut grid = None;
    while let Ok(update) = ui_rx.try_recv() {
        if let UiUpdate::ZoneData(g) = update {
            grid = Some(g);
        }
    }
    let grid = grid.expect("zone data should be pushed at startup");
    assert!(approx_eq(grid.corners[0], 71.0, 1e-9));
}

#[tokio::test]
async fn team_selection_flows_through_to_summary() {
    let (mut state, _ui_rx) = ready_state().await;

    assert!(state.handle_command(UserCommand::SelectTeam("SFG".into())).await);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.team.as_deref(), Some("SFG"));
    assert_eq!(snapshot.roster.len(), 3);
    assert_eq!(snapshot.opponent.as_deref(), Some("LAD"));

    let summary = snapshot.opponent_summary.expect("LAD batting data loaded");
    assert!(approx_eq(summary.batting_average, 0.304, 1e-9));
    assert!(approx_eq(summary.slugging_percentage, 0.540, 1e-9));

    // Roster risk covers the whole team, highest risk first
    assert_eq!(snapshot.roster_risk.len(), 3);
    assert!(snapshot.roster_risk[0].score >= snapshot.roster_risk[2].score);
}

#[tokio::test]
async fn unknown_pitcher_surfaces_notice_not_crash() {
    let (mut state, _ui_rx) = ready_state().await;
    state.handle_command(UserCommand::SelectTeam("SFG".into())).await;
    state
        .handle_command(UserCommand::SelectPitcherA("Sandy Koufax".into()))
        .await;

    let snapshot = state.snapshot();
    assert!(snapshot.risk_a.is_none());
    let notice = snapshot.notice.expect("missing pitcher should be noticed");
    assert!(notice.contains("Sandy Koufax"));
}

#[tokio::test]
async fn unresolvable_opponent_degrades_to_zero_summary() {
    let (mut state, _ui_rx) = ready_state().await;
    state.handle_command(UserCommand::SelectTeam("SFG".into())).await;
    state
        .handle_command(UserCommand::SelectOpponent("NYY".into()))
        .await;

    let snapshot = state.snapshot();
    let summary = snapshot.opponent_summary.expect("empty summary expected");
    assert!(approx_eq(summary.batting_average, 0.0, 1e-12));
    assert!(approx_eq(summary.on_base_percentage, 0.0, 1e-12));
    assert!(approx_eq(summary.slugging_percentage, 0.0, 1e-12));
    assert!(snapshot.notice.expect("notice expected").contains("NYY"));
}

// ===========================================================================
// Cache behavior
// ===========================================================================

#[tokio::test]
async fn season_data_is_cached_until_refresh() {
    let pitching_calls = Arc::new(AtomicUsize::new(0));
    let batting_calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: fixture_source(),
        pitching_calls: pitching_calls.clone(),
        batting_calls: batting_calls.clone(),
    };

    let (ui_tx, _ui_rx) = mpsc::channel(256);
    let mut state = AppState::new(fixture_config(), Box::new(source), ui_tx);
    state.initialize().await.unwrap();
    assert_eq!(pitching_calls.load(Ordering::SeqCst), 1);
    let batting_after_init = batting_calls.load(Ordering::SeqCst);

    // Bouncing the opponent selection back and forth hits the cache
    state.handle_command(UserCommand::SelectOpponent("SFG".into())).await;
    state.handle_command(UserCommand::SelectOpponent("LAD".into())).await;
    state.handle_command(UserCommand::SelectOpponent("SFG".into())).await;
    assert_eq!(pitching_calls.load(Ordering::SeqCst), 1);
    assert_eq!(batting_calls.load(Ordering::SeqCst), batting_after_init + 1);

    // Refresh drops both caches and refetches
    state.handle_command(UserCommand::Refresh).await;
    assert_eq!(pitching_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn year_change_triggers_new_fetch() {
    let pitching_calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: fixture_source(),
        pitching_calls: pitching_calls.clone(),
        batting_calls: Arc::new(AtomicUsize::new(0)),
    };

    let (ui_tx, _ui_rx) = mpsc::channel(256);
    let mut state = AppState::new(fixture_config(), Box::new(source), ui_tx);
    state.initialize().await.unwrap();

    state.handle_command(UserCommand::SelectYear(2023)).await;
    assert_eq!(pitching_calls.load(Ordering::SeqCst), 2);

    // Re-selecting the current year is a no-op
    state.handle_command(UserCommand::SelectYear(2023)).await;
    assert_eq!(pitching_calls.load(Ordering::SeqCst), 2);
}

// ===========================================================================
// Full loop shutdown
// ===========================================================================

#[tokio::test]
async fn run_loop_exits_on_quit() {
    let (ui_tx, mut ui_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let state = AppState::new(fixture_config(), Box::new(fixture_source()), ui_tx);

    let handle = tokio::spawn(app::run(cmd_rx, state));

    // Drain startup updates so the channel never backs up
    let drained = tokio::spawn(async move { while ui_rx.recv().await.is_some() {} });

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("run loop should exit after Quit")
        .unwrap();
    assert!(result.is_ok());

    drop(cmd_tx);
    drained.abort();
}

// ===========================================================================
// Config loading from defaults
// ===========================================================================

#[test]
fn default_config_loads_and_validates() {
    let root = std::env::current_dir().unwrap();
    pitch_scout::config::ensure_config_files(&root).unwrap();
    let config = pitch_scout::config::load_config().unwrap();

    assert_eq!(config.season.default_opponent, "LAD");
    assert_eq!(config.risk_metrics, DEFAULT_METRICS.to_vec());
    assert_eq!(config.source.kind, "csv");
}
