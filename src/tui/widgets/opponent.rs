// Opponent panel widget: the selected opponent's team offensive summary.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let title = match snapshot.opponent.as_deref() {
        Some(team) => format!("Opponent: {team}"),
        None => "Opponent".to_string(),
    };

    let lines = match &snapshot.opponent_summary {
        Some(summary) => vec![
            stat_line("BA ", summary.batting_average),
            stat_line("OBP", summary.on_base_percentage),
            stat_line("SLG", summary.slugging_percentage),
        ],
        None => vec![Line::from(Span::styled(
            "No batting data loaded.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn stat_line(label: &'static str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}  "), Style::default().fg(Color::Gray)),
        Span::styled(
            format_average(value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Scorebook-style formatting: three decimals with the leading zero dropped
/// (".258" rather than "0.258", but "1.750" kept as is).
pub fn format_average(value: f64) -> String {
    let text = format!("{:.3}", value);
    match text.strip_prefix("0.") {
        Some(rest) => format!(".{rest}"),
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
