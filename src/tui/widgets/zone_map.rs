// Strike-zone heat-map widget.
//
// The zone is drawn on a 5x5 cell grid: the 3x3 inner grid sits in the
// middle, the four corner blocks occupy the grid corners, and the edge
// cells between them stay blank. The inner grid and the corner blocks are
// color-mapped on two independent min-max scales, so a hot corner never
// washes out the inner gradient. Cell labels are the raw values rounded to
// integers.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::stats::risk::normalize_column;
use crate::tui::ViewState;

// Cool-to-hot ramp endpoints for the inner grid (blue, pale yellow, red).
const INNER_COOL: (u8, u8, u8) = (69, 117, 180);
const INNER_MID: (u8, u8, u8) = (255, 255, 191);
const INNER_HOT: (u8, u8, u8) = (215, 48, 39);

// Yellow-to-red ramp endpoints for the corner blocks.
const CORNER_COOL: (u8, u8, u8) = (255, 255, 178);
const CORNER_HOT: (u8, u8, u8) = (189, 0, 38);

/// Which data cell a 5x5 grid position maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneCell {
    /// Inner grid cell (row, col), both in 0..3.
    Inner(usize, usize),
    /// Corner block index: 0 top-left, 1 top-right, 2 bottom-left,
    /// 3 bottom-right.
    Corner(usize),
}

/// Map a 5x5 grid position to its data cell, if any. Edge cells between
/// the corners and the inner grid are blank.
pub fn cell_at(row: usize, col: usize) -> Option<ZoneCell> {
    match (row, col) {
        (0, 0) => Some(ZoneCell::Corner(0)),
        (0, 4) => Some(ZoneCell::Corner(1)),
        (4, 0) => Some(ZoneCell::Corner(2)),
        (4, 4) => Some(ZoneCell::Corner(3)),
        (1..=3, 1..=3) => Some(ZoneCell::Inner(row - 1, col - 1)),
        _ => None,
    }
}

/// Render the strike-zone heat map into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Strike Zone");
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(grid) = &state.zone else {
        let placeholder = Paragraph::new("No zone data loaded.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner_area);
        return;
    };
    if inner_area.width < 5 || inner_area.height < 5 {
        return;
    }

    let inner_values: Vec<f64> = grid.inner.iter().flatten().copied().collect();
    let inner_norm = normalize_column(&inner_values);
    let corner_norm = normalize_column(&grid.corners);

    let rows = Layout::vertical([Constraint::Ratio(1, 5); 5]).split(inner_area);
    for (r, row_rect) in rows.iter().enumerate() {
        let cols = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(*row_rect);
        for (c, cell_rect) in cols.iter().enumerate() {
            let Some(cell) = cell_at(r, c) else {
                continue;
            };
            let (value, norm, background) = match cell {
                ZoneCell::Inner(ir, ic) => {
                    let norm = inner_norm[ir * 3 + ic];
                    (grid.inner[ir][ic], norm, inner_color(norm))
                }
                ZoneCell::Corner(i) => {
                    let norm = corner_norm[i];
                    (grid.corners[i], norm, corner_color(norm))
                }
            };
            render_cell(frame, *cell_rect, value, norm, background);
        }
    }
}

fn render_cell(frame: &mut Frame, rect: Rect, value: f64, norm: f64, background: Color) {
    let label = format!("{}", value.round() as i64);
    // Pad the label down to the vertical middle of the cell
    let pad = (rect.height.saturating_sub(1) / 2) as usize;
    let mut lines = vec![Line::default(); pad];
    lines.push(Line::from(label));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(background).fg(label_color(norm)));
    frame.render_widget(paragraph, rect);
}

// ---------------------------------------------------------------------------
// Color ramps
// ---------------------------------------------------------------------------

fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Inner grid ramp: blue through pale yellow to red.
pub fn inner_color(norm: f64) -> Color {
    if norm <= 0.5 {
        blend(INNER_COOL, INNER_MID, norm * 2.0)
    } else {
        blend(INNER_MID, INNER_HOT, (norm - 0.5) * 2.0)
    }
}

/// Corner block ramp: pale yellow to deep red.
pub fn corner_color(norm: f64) -> Color {
    blend(CORNER_COOL, CORNER_HOT, norm)
}

/// Label color: white on the hot (dark) half of the ramp, black on the
/// pale half.
pub fn label_color(norm: f64) -> Color {
    if norm > 0.5 {
        Color::White
    } else {
        Color::Black
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
