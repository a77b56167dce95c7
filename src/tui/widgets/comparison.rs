// Comparison widget: side-by-side rate stats for the two selected pitchers.
//
// One row per metric, one column per pitcher, with the composite risk score
// in the final row. Missing selections render as "--" columns rather than
// hiding the table.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::stats::risk::PitcherRateRow;
use crate::tui::ViewState;

/// Render the comparison table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let row_a = find_row(&snapshot.roster, snapshot.pitcher_a.as_deref());
    let row_b = find_row(&snapshot.roster, snapshot.pitcher_b.as_deref());

    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from(snapshot.pitcher_a.clone().unwrap_or_else(|| "--".into())),
        Cell::from(snapshot.pitcher_b.clone().unwrap_or_else(|| "--".into())),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let metric_rows: [(&str, fn(&PitcherRateRow) -> f64); 7] = [
        ("ERA", |r| r.era),
        ("WHIP", |r| r.whip),
        ("HR/9", |r| r.hr_per_9),
        ("K/9", |r| r.k_per_9),
        ("BB/9", |r| r.bb_per_9),
        ("GB%", |r| r.gb_pct),
        ("FB%", |r| r.fb_pct),
    ];

    let mut rows: Vec<Row> = metric_rows
        .iter()
        .map(|(name, extract)| {
            Row::new(vec![
                Cell::from(*name),
                Cell::from(format_metric(row_a.map(extract))),
                Cell::from(format_metric(row_b.map(extract))),
            ])
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("Risk"),
            risk_cell(snapshot.risk_a),
            risk_cell(snapshot.risk_b),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Pitcher Comparison"),
    );
    frame.render_widget(table, area);
}

fn find_row<'a>(roster: &'a [PitcherRateRow], name: Option<&str>) -> Option<&'a PitcherRateRow> {
    let name = name?;
    roster.iter().find(|r| r.name == name)
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "--".to_string(),
    }
}

/// The risk cell carries a color band: green below 1/3, yellow up to 2/3,
/// red above.
fn risk_cell(risk: Option<f64>) -> Cell<'static> {
    match risk {
        Some(score) => {
            Cell::from(format!("{:.2}", score)).style(Style::default().fg(risk_color(score)))
        }
        None => Cell::from("--"),
    }
}

pub fn risk_color(score: f64) -> Color {
    if score < 1.0 / 3.0 {
        Color::Green
    } else if score < 2.0 / 3.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
