// Risk board widget: the full roster ranked by composite risk score.
//
// Highest risk first, with the scored metric columns alongside for context.
// Scrollable through the shared scroll offset map under the "risk" key.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::comparison::risk_color;
use crate::tui::ViewState;

/// Render the risk ranking table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let scroll = state.scroll_offset.get("risk").copied().unwrap_or(0);

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Pitcher"),
        Cell::from("ERA"),
        Cell::from("WHIP"),
        Cell::from("HR/9"),
        Cell::from("Risk"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let selected = [snapshot.pitcher_a.as_deref(), snapshot.pitcher_b.as_deref()];

    let rows: Vec<Row> = snapshot
        .roster_risk
        .iter()
        .enumerate()
        .skip(scroll)
        .map(|(i, entry)| {
            let rates = snapshot.roster.iter().find(|r| r.name == entry.name);
            let style = if selected.contains(&Some(entry.name.as_str())) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(rate_cell(rates.map(|r| r.era))),
                Cell::from(rate_cell(rates.map(|r| r.whip))),
                Cell::from(rate_cell(rates.map(|r| r.hr_per_9))),
                Cell::from(format!("{:.2}", entry.score))
                    .style(Style::default().fg(risk_color(entry.score))),
            ])
            .style(style)
        })
        .collect();

    let title = format!("Roster Risk ({})", snapshot.roster_risk.len());

    let widths = [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn rate_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
