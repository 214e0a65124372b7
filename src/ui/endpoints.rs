// Endpoint list rendering module
//
// One block per endpoint: name and current reading, region with rolling
// statistics, then a sparkline of the retained history.

use crate::app::AppState;
use crate::radar::endpoint::EndpointState;
use crate::radar::render::Scene;
use crate::theme::{quality_color, FOG_WHITE, RADAR_CYAN};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{canvas::Canvas, Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::radar::{background, paint_scene, surface_size};

/// Terminal rows used by one endpoint entry
const ROW_HEIGHT: u16 = 4;

/// Rows of the entry given to the sparkline
const SPARK_ROWS: u16 = 2;

/// Column width reserved for the reading on the first line
const READING_WIDTH: usize = 7;

/// Truncate `text` to at most `width` terminal columns, marking the cut with an ellipsis
fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// First visible entry so the selection always stays on screen
fn scroll_offset(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}

pub fn render_endpoint_list(f: &mut Frame, area: Rect, app: &AppState) {
    let states = app.radar.states();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RADAR_CYAN))
        .title(Span::styled(
            format!("━ Endpoints ({}) ", states.len()),
            Style::default().fg(RADAR_CYAN).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if states.is_empty() || inner.height == 0 {
        return;
    }

    let visible = usize::from((inner.height / ROW_HEIGHT).max(1));
    let offset = scroll_offset(app.selected_endpoint, visible);

    for (slot, (index, state)) in states
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let y = inner.y + slot as u16 * ROW_HEIGHT;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: ROW_HEIGHT.min(inner.bottom() - y),
        };
        render_endpoint_row(f, row, state, index == app.selected_endpoint);
    }
}

fn render_endpoint_row(f: &mut Frame, area: Rect, state: &EndpointState, selected: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(ROW_HEIGHT - SPARK_ROWS), Constraint::Min(0)])
        .split(area);

    let marker = if selected { "▶ " } else { "  " };
    let name_width = usize::from(area.width).saturating_sub(marker.width() + READING_WIDTH + 1);

    let reading_color = state
        .latest
        .map(|sample| quality_color(sample.quality()))
        .unwrap_or(Color::DarkGray);

    let name_style = if selected {
        Style::default().fg(FOG_WHITE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FOG_WHITE)
    };

    let name = fit_width(&state.endpoint.name, name_width);
    let padding = " ".repeat(name_width.saturating_sub(name.width()) + 1);

    let avg = state
        .history
        .average_ms()
        .map(|ms| format!("avg {:.0}ms", ms))
        .unwrap_or_else(|| "avg --".to_string());
    let loss = format!("loss {:.0}%", state.history.loss_ratio() * 100.0);

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(RADAR_CYAN)),
            Span::styled(name, name_style),
            Span::raw(padding),
            Span::styled(
                format!("{:>width$}", state.reading(), width = READING_WIDTH),
                Style::default().fg(reading_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                fit_width(&state.endpoint.region, name_width),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("  ", Style::default()),
            Span::styled(avg, Style::default().fg(Color::Gray)),
            Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            Span::styled(loss, Style::default().fg(Color::Gray)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), chunks[0]);

    if chunks[1].height == 0 || chunks[1].width < 3 {
        return;
    }

    let spark_area = Rect {
        x: chunks[1].x + 2,
        width: chunks[1].width - 2,
        ..chunks[1]
    };
    let (width, height) = surface_size(spark_area);
    let scene = Scene::sparkline(&state.history, width, height);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background())
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| paint_scene(ctx, &scene));

    f.render_widget(canvas, spark_area);
}
