// Shared message and value types exchanged between the app orchestrator
// and the TUI over mpsc channels: `UserCommand` flows up from the TUI,
// `UiUpdate` flows down from the orchestrator.

use serde::Deserialize;

use crate::stats::batting::TeamOffensiveSummary;
use crate::stats::risk::{PitcherRateRow, RiskScore};

// ---------------------------------------------------------------------------
// Fetch status
// ---------------------------------------------------------------------------

/// State of the season-data fetch pipeline, shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Which tab is active in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Comparison,
    Risk,
    Zones,
}

// ---------------------------------------------------------------------------
// Zone heat-map data
// ---------------------------------------------------------------------------

/// Strike-zone heat-map input: a 3x3 inner grid plus four corner blocks,
/// each color-mapped on its own independent scale when rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneGrid {
    pub inner: [[f64; 3]; 3],
    pub corners: [f64; 4],
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Full dashboard state pushed to the TUI after every recomputation.
///
/// The snapshot is self-contained: the TUI renders exclusively from it (plus
/// local view concerns like scroll offsets and the active tab).
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub year: u16,
    /// All team abbreviations present in the loaded season, sorted.
    pub teams: Vec<String>,
    /// Currently selected team.
    pub team: Option<String>,
    /// The selected team's pitchers, in data order.
    pub roster: Vec<PitcherRateRow>,
    pub pitcher_a: Option<String>,
    pub pitcher_b: Option<String>,
    /// Risk scores for the selected pitchers, relative to the full roster.
    pub risk_a: Option<f64>,
    pub risk_b: Option<f64>,
    /// Every roster pitcher's risk score, highest risk first.
    pub roster_risk: Vec<RiskScore>,
    pub opponent: Option<String>,
    /// Opponent team offensive summary; `None` until batting data arrives.
    pub opponent_summary: Option<TeamOffensiveSummary>,
    /// User-facing notice (e.g. duplicate pitcher selection, empty team).
    pub notice: Option<String>,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    FetchStatus(FetchStatus),
    /// Zone heat-map data loaded (or reloaded) from the configured file.
    ZoneData(ZoneGrid),
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SelectYear(u16),
    SelectTeam(String),
    SelectPitcherA(String),
    SelectPitcherB(String),
    SelectOpponent(String),
    /// Drop cached season data and fetch again.
    Refresh,
    Quit,
}
