// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the scouting dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Selector Bar (4 rows)                             |
// +-------------------------+------------------------+
// | Main Panel (70%)         | Opponent Panel (30%)   |
// |                          |                        |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: fetch status, season year, tab indicator.
    pub status_bar: Rect,
    /// Second block: team, pitcher, and opponent selections.
    pub selector_bar: Rect,
    /// Left side of the middle section: tab-switched content area.
    pub main_panel: Rect,
    /// Right side: opponent offense summary.
    pub opponent_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
///
/// The layout uses fixed heights for the status bar, selector bar, and help
/// bar, with the remaining space split between the main panel and the
/// opponent column.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | selectors(4) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Length(4),  // selector bar
            Constraint::Min(10),   // middle section (main + opponent)
            Constraint::Length(1),  // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let selector_bar = vertical[1];
    let middle = vertical[2];
    let help_bar = vertical[3];

    // Horizontal: main panel (70%) | opponent panel (30%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70),
            Constraint::Percentage(30),
        ])
        .split(middle);

    let main_panel = horizontal[0];
    let opponent_panel = horizontal[1];

    AppLayout {
        status_bar,
        selector_bar,
        main_panel,
        opponent_panel,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
