// TUI widget modules for each dashboard panel.

pub mod comparison;
pub mod opponent;
pub mod risk_board;
pub mod selectors;
pub mod status_bar;
pub mod zone_map;
