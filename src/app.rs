// Application state and orchestration logic.
//
// The central event loop that owns the season caches and the data source,
// applies user commands from the TUI, recomputes the derived statistics,
// and pushes `UiUpdate` snapshots back to the TUI render loop. The stats
// engine itself stays pure; everything stateful lives here.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::protocol::{AppSnapshot, FetchStatus, UiUpdate, UserCommand};
use crate::provider::{self, SeasonSource};
use crate::stats::batting::{self, PlayerBattingRow};
use crate::stats::risk::{self, PitcherRateRow};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How often expired cache entries are swept in the main event loop.
const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Pure selection helpers
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated team abbreviations present in the pitching rows.
pub fn team_list(rows: &[PitcherRateRow]) -> Vec<String> {
    let mut teams: Vec<String> = rows.iter().map(|r| r.team.clone()).collect();
    teams.sort();
    teams.dedup();
    teams
}

/// Pitching rows for one team, in data order.
pub fn roster_of(rows: &[PitcherRateRow], team: &str) -> Vec<PitcherRateRow> {
    rows.iter().filter(|r| r.team == team).cloned().collect()
}

/// Pick an opponent: the preferred abbreviation when it exists in the data
/// and differs from the selected team, otherwise the first other team.
pub fn choose_opponent(
    teams: &[String],
    selected: Option<&str>,
    preferred: &str,
) -> Option<String> {
    let differs = |t: &str| Some(t) != selected;
    if teams.iter().any(|t| t == preferred) && differs(preferred) {
        return Some(preferred.to_string());
    }
    teams.iter().find(|t| differs(t)).cloned()
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    source: Box<dyn SeasonSource>,
    /// League-wide pitching rows, keyed by season year.
    pitching_cache: TtlCache<u16, Vec<PitcherRateRow>>,
    /// Per-team batting rows, keyed by (year, team abbreviation).
    batting_cache: TtlCache<(u16, String), Vec<PlayerBattingRow>>,

    pub year: u16,
    pub team: Option<String>,
    pub pitcher_a: Option<String>,
    pub pitcher_b: Option<String>,
    pub opponent: Option<String>,

    /// Pitching rows for the current season (all teams).
    pitching: Vec<PitcherRateRow>,
    /// Batting rows for the current opponent selection.
    opponent_rows: Option<Vec<PlayerBattingRow>>,

    ui_tx: mpsc::Sender<UiUpdate>,
}

impl AppState {
    pub fn new(
        config: Config,
        source: Box<dyn SeasonSource>,
        ui_tx: mpsc::Sender<UiUpdate>,
    ) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let year = config.season_year();
        AppState {
            config,
            source,
            pitching_cache: TtlCache::new(ttl),
            batting_cache: TtlCache::new(ttl),
            year,
            team: None,
            pitcher_a: None,
            pitcher_b: None,
            opponent: None,
            pitching: Vec::new(),
            opponent_rows: None,
            ui_tx,
        }
    }

    // -- Data loading ------------------------------------------------------

    /// One-time startup work: zone data, then the initial season load.
    pub async fn initialize(&mut self) -> anyhow::Result<()> {
        if let Some(zones_path) = self.config.data_paths.zones.clone() {
            match provider::load_zone_grid(Path::new(&zones_path)) {
                Ok(grid) => {
                    let _ = self.ui_tx.send(UiUpdate::ZoneData(grid)).await;
                }
                Err(e) => warn!("zone data unavailable: {}", e),
            }
        }
        self.load_season().await;
        Ok(())
    }

    /// Fetch the current season's pitching rows (through the cache), repair
    /// the selections against the new data, refetch the opponent's batting
    /// rows, and push a snapshot.
    async fn load_season(&mut self) {
        let _ = self.ui_tx.send(UiUpdate::FetchStatus(FetchStatus::Loading)).await;

        if self.pitching_cache.get(&self.year).is_none() {
            match self.source.pitching(self.year).await {
                Ok(rows) => {
                    info!(year = self.year, rows = rows.len(), "pitching data loaded");
                    self.pitching_cache.insert(self.year, rows);
                }
                Err(e) => {
                    warn!(year = self.year, "pitching fetch failed: {}", e);
                    let _ = self.ui_tx.send(UiUpdate::FetchStatus(FetchStatus::Error)).await;
                    self.pitching = Vec::new();
                    self.opponent_rows = None;
                    self.push_snapshot().await;
                    return;
                }
            }
        }
        self.pitching = self
            .pitching_cache
            .get(&self.year)
            .cloned()
            .unwrap_or_default();

        self.repair_selections();
        self.load_opponent().await;

        let _ = self.ui_tx.send(UiUpdate::FetchStatus(FetchStatus::Ready)).await;
        self.push_snapshot().await;
    }

    /// Fetch batting rows for the current opponent through the cache.
    async fn load_opponent(&mut self) {
        let Some(opponent) = self.opponent.clone() else {
            self.opponent_rows = None;
            return;
        };
        let key = (self.year, opponent.clone());
        if self.batting_cache.get(&key).is_none() {
            match self.source.batting(self.year).await {
                Ok(rows) => {
                    let team_rows: Vec<PlayerBattingRow> = rows
                        .into_iter()
                        .filter(|r| r.team == opponent)
                        .collect();
                    info!(
                        year = self.year,
                        team = %opponent,
                        rows = team_rows.len(),
                        "batting data loaded"
                    );
                    self.batting_cache.insert(key.clone(), team_rows);
                }
                Err(e) => {
                    warn!(year = self.year, team = %opponent, "batting fetch failed: {}", e);
                    self.opponent_rows = None;
                    return;
                }
            }
        }
        self.opponent_rows = self.batting_cache.get(&key).cloned();
    }

    // -- Selection maintenance --------------------------------------------

    /// Make the selections consistent with the currently loaded season:
    /// keep what is still valid, re-default what is not.
    fn repair_selections(&mut self) {
        let teams = team_list(&self.pitching);

        if !self
            .team
            .as_deref()
            .is_some_and(|t| teams.iter().any(|x| x == t))
        {
            self.team = teams.first().cloned();
            self.pitcher_a = None;
            self.pitcher_b = None;
        }

        let roster = match self.team.as_deref() {
            Some(team) => roster_of(&self.pitching, team),
            None => Vec::new(),
        };
        let in_roster =
            |name: Option<&str>| name.is_some_and(|n| roster.iter().any(|r| r.name == n));

        if !in_roster(self.pitcher_a.as_deref()) {
            self.pitcher_a = roster.first().map(|r| r.name.clone());
        }
        if !in_roster(self.pitcher_b.as_deref()) {
            // Second roster entry when available, mirroring the original's
            // default of index 1 for pitcher B.
            self.pitcher_b = roster
                .get(1)
                .or_else(|| roster.first())
                .map(|r| r.name.clone());
        }

        if !self
            .opponent
            .as_deref()
            .is_some_and(|o| teams.iter().any(|x| x == o) && Some(o) != self.team.as_deref())
        {
            self.opponent = choose_opponent(
                &teams,
                self.team.as_deref(),
                &self.config.season.default_opponent,
            );
        }
    }

    // -- Snapshot ----------------------------------------------------------

    /// Build the dashboard snapshot from the current state. Pure with
    /// respect to the fetched data; all degenerate cases resolve to empty
    /// or zero values with a user-facing notice, never an error.
    pub fn snapshot(&self) -> AppSnapshot {
        let teams = team_list(&self.pitching);
        let roster = match self.team.as_deref() {
            Some(team) => roster_of(&self.pitching, team),
            None => Vec::new(),
        };

        let scores = risk::score(&roster, &self.config.risk_metrics);
        let mut notice = None;

        let mut risk_of = |name: Option<&str>| -> Option<f64> {
            let name = name?;
            match risk::lookup(&scores, name) {
                Ok(s) => Some(s.score),
                Err(e) => {
                    if notice.is_none() {
                        notice = Some(e.to_string());
                    }
                    None
                }
            }
        };
        let risk_a = risk_of(self.pitcher_a.as_deref());
        let risk_b = risk_of(self.pitcher_b.as_deref());

        let mut roster_risk: Vec<_> = scores.values().cloned().collect();
        roster_risk.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let opponent_summary = self.opponent_rows.as_deref().map(batting::aggregate);

        if notice.is_none() {
            if self.pitching.is_empty() {
                notice = Some(format!("No pitching data for {}.", self.year));
            } else if roster.is_empty() {
                notice = self
                    .team
                    .as_deref()
                    .map(|t| format!("No pitchers found for {t}."));
            } else if self.pitcher_a.is_some() && self.pitcher_a == self.pitcher_b {
                notice = Some("Select two different pitchers.".into());
            } else if let (Some(opp), Some(rows)) =
                (self.opponent.as_deref(), self.opponent_rows.as_deref())
            {
                if rows.is_empty() {
                    notice = Some(format!("No batting data found for {opp}."));
                }
            }
        }

        AppSnapshot {
            year: self.year,
            teams,
            team: self.team.clone(),
            roster,
            pitcher_a: self.pitcher_a.clone(),
            pitcher_b: self.pitcher_b.clone(),
            risk_a,
            risk_b,
            roster_risk,
            opponent: self.opponent.clone(),
            opponent_summary,
            notice,
        }
    }

    async fn push_snapshot(&self) {
        let _ = self
            .ui_tx
            .send(UiUpdate::Snapshot(Box::new(self.snapshot())))
            .await;
    }

    // -- Command handling --------------------------------------------------

    /// Apply one user command. Returns `false` when the app should quit.
    pub async fn handle_command(&mut self, command: UserCommand) -> bool {
        match command {
            UserCommand::SelectYear(year) => {
                if year != self.year {
                    self.year = year;
                    self.load_season().await;
                }
            }
            UserCommand::SelectTeam(team) => {
                if Some(team.as_str()) != self.team.as_deref() {
                    self.team = Some(team);
                    self.pitcher_a = None;
                    self.pitcher_b = None;
                    self.repair_selections();
                    self.load_opponent().await;
                    self.push_snapshot().await;
                }
            }
            UserCommand::SelectPitcherA(name) => {
                self.pitcher_a = Some(name);
                self.push_snapshot().await;
            }
            UserCommand::SelectPitcherB(name) => {
                self.pitcher_b = Some(name);
                self.push_snapshot().await;
            }
            UserCommand::SelectOpponent(opponent) => {
                if Some(opponent.as_str()) != self.opponent.as_deref() {
                    self.opponent = Some(opponent);
                    self.load_opponent().await;
                    self.push_snapshot().await;
                }
            }
            UserCommand::Refresh => {
                self.pitching_cache.clear();
                self.batting_cache.clear();
                self.load_season().await;
            }
            UserCommand::Quit => return false,
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the app orchestration loop until the TUI sends `Quit` or hangs up.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut state: AppState,
) -> anyhow::Result<()> {
    state
        .initialize()
        .await
        .context("failed to load initial season data")?;

    let mut purge_tick = tokio::time::interval(CACHE_PURGE_INTERVAL);
    purge_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                match command {
                    Some(command) => {
                        if !state.handle_command(command).await {
                            info!("quit command received");
                            break;
                        }
                    }
                    None => {
                        // TUI hung up: shut down
                        break;
                    }
                }
            }

            _ = purge_tick.tick() => {
                state.pitching_cache.purge_expired();
                state.batting_cache.purge_expired();
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
