// Selector bar widget: current team, pitcher, and opponent selections.
//
// Two lines inside a bordered block. A notice from the orchestrator (bad
// selection, missing data) replaces the second line in yellow.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;

    let first = Line::from(vec![
        label("Team "),
        value(snapshot.team.as_deref()),
        label("  Opponent "),
        value(snapshot.opponent.as_deref()),
    ]);

    let second = match snapshot.notice.as_deref() {
        Some(notice) => Line::from(Span::styled(
            notice.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            label("A: "),
            value(snapshot.pitcher_a.as_deref()),
            label("  B: "),
            value(snapshot.pitcher_b.as_deref()),
        ]),
    };

    let paragraph = Paragraph::new(vec![first, second]).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Selections"),
    );
    frame.render_widget(paragraph, area);
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn value(text: Option<&str>) -> Span<'static> {
    match text {
        Some(v) => Span::styled(
            v.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("--".to_string(), Style::default().fg(Color::DarkGray)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
