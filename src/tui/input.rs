// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (e.g. tab switching,
// scroll). Selection keys cycle through the option lists carried by the
// latest snapshot, so the handler never needs to talk back to the data
// layer to know what comes next.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::config::FIRST_SEASON;
use crate::protocol::{TabId, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (selection changes, refresh, quit). Returns `None` when
/// the key press was handled locally by mutating `ViewState` (tab switching,
/// scrolling) or mapped to nothing.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        // Tab switching
        KeyCode::Char('1') => {
            view_state.active_tab = TabId::Comparison;
            None
        }
        KeyCode::Char('2') => {
            view_state.active_tab = TabId::Risk;
            None
        }
        KeyCode::Char('3') => {
            view_state.active_tab = TabId::Zones;
            None
        }

        // Scrolling (main panel)
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, page_size());
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, page_size());
            None
        }

        // Team cycling
        KeyCode::Char('t') => cycle_team(view_state, 1),
        KeyCode::Char('T') => cycle_team(view_state, -1),

        // Pitcher cycling
        KeyCode::Char('a') => cycle_pitcher(view_state, Slot::A, 1),
        KeyCode::Char('A') => cycle_pitcher(view_state, Slot::A, -1),
        KeyCode::Char('b') => cycle_pitcher(view_state, Slot::B, 1),
        KeyCode::Char('B') => cycle_pitcher(view_state, Slot::B, -1),

        // Opponent cycling (skips the selected team)
        KeyCode::Char('o') => cycle_opponent(view_state, 1),
        KeyCode::Char('O') => cycle_opponent(view_state, -1),

        // Season year stepping
        KeyCode::Char('y') => Some(UserCommand::SelectYear(
            view_state.snapshot.year.saturating_add(1),
        )),
        KeyCode::Char('Y') => {
            let year = view_state.snapshot.year.saturating_sub(1).max(FIRST_SEASON);
            Some(UserCommand::SelectYear(year))
        }

        // Drop cached data and refetch
        KeyCode::Char('r') => Some(UserCommand::Refresh),

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Selection cycling
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Slot {
    A,
    B,
}

/// Pick the item `step` positions away from `current` in `items`, wrapping
/// at both ends. Falls back to the first item when `current` is absent.
fn cycle<'a>(items: &'a [String], current: Option<&str>, step: isize) -> Option<&'a String> {
    if items.is_empty() {
        return None;
    }
    let len = items.len() as isize;
    let index = match current.and_then(|c| items.iter().position(|x| x == c)) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None => 0,
    };
    items.get(index as usize)
}

fn cycle_team(view_state: &ViewState, step: isize) -> Option<UserCommand> {
    let snapshot = &view_state.snapshot;
    cycle(&snapshot.teams, snapshot.team.as_deref(), step)
        .map(|team| UserCommand::SelectTeam(team.clone()))
}

fn cycle_pitcher(view_state: &ViewState, slot: Slot, step: isize) -> Option<UserCommand> {
    let snapshot = &view_state.snapshot;
    let names: Vec<String> = snapshot.roster.iter().map(|r| r.name.clone()).collect();
    let current = match slot {
        Slot::A => snapshot.pitcher_a.as_deref(),
        Slot::B => snapshot.pitcher_b.as_deref(),
    };
    cycle(&names, current, step).map(|name| match slot {
        Slot::A => UserCommand::SelectPitcherA(name.clone()),
        Slot::B => UserCommand::SelectPitcherB(name.clone()),
    })
}

fn cycle_opponent(view_state: &ViewState, step: isize) -> Option<UserCommand> {
    let snapshot = &view_state.snapshot;
    let candidates: Vec<String> = snapshot
        .teams
        .iter()
        .filter(|t| Some(t.as_str()) != snapshot.team.as_deref())
        .cloned()
        .collect();
    cycle(&candidates, snapshot.opponent.as_deref(), step)
        .map(|team| UserCommand::SelectOpponent(team.clone()))
}

// ---------------------------------------------------------------------------
// Scrolling
// ---------------------------------------------------------------------------

/// Get the widget key for scroll state based on the active tab.
fn active_widget_key(view_state: &ViewState) -> &'static str {
    match view_state.active_tab {
        TabId::Comparison => "comparison",
        TabId::Risk => "risk",
        TabId::Zones => "zones",
    }
}

/// Scroll up by the given number of lines.
fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll down by the given number of lines.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
