// UI rendering module
//
// This module contains all UI rendering components for pingradar.
// The main draw() function orchestrates rendering of all UI panels.

mod banner;
mod endpoints;
mod radar;
mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use banner::render_banner;
use endpoints::render_endpoint_list;
use radar::render_radar_panel;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: banner, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_banner(f, chunks[0], app);

    // Body: radar + endpoint list
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_radar_panel(f, body_chunks[0], app);
    render_endpoint_list(f, body_chunks[1], app);

    render_status_bar(f, chunks[2], app);
}
