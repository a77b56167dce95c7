// Status bar widget: fetch status, season year, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{FetchStatus, TabId};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [fetch indicator] [season year] [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    // Fetch indicator
    let (dot, dot_color) = fetch_indicator(state.fetch_status);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));

    // Season year
    spans.push(Span::styled(
        format!("Season {}", state.snapshot.year),
        Style::default().fg(Color::White),
    ));

    // Separator
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    // Tab bar
    spans.extend(tab_spans(state.active_tab));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the fetch status dot character and its color.
pub fn fetch_indicator(status: FetchStatus) -> (&'static str, Color) {
    match status {
        FetchStatus::Idle => ("●", Color::DarkGray),
        FetchStatus::Loading => ("●", Color::Yellow),
        FetchStatus::Ready => ("●", Color::Green),
        FetchStatus::Error => ("●", Color::Red),
    }
}

/// Build tab indicator spans with descriptive labels and active tab highlighted.
/// E.g. "[1:Compare] [2:Risk] [3:Zones]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [
        (TabId::Comparison, "1:Compare"),
        (TabId::Risk, "2:Risk"),
        (TabId::Zones, "3:Zones"),
    ];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
