// Banner rendering module
//
// Renders the top banner with ASCII art logo and global stats.

use crate::app::AppState;
use crate::theme::{interpolate_color, FOG_WHITE, RADAR_CYAN, SIGNAL_GREEN};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const LOGO: [&str; 5] = [
    "  ___ _           ___         _         ",
    " | _ (_)_ _  __ _| _ \\__ _ __| |__ _ _ _ ",
    " |  _/ | ' \\/ _` |   / _` / _` / _` | '_|",
    " |_| |_|_||_\\__, |_|_\\__,_\\__,_\\__,_|_|  ",
    "            |___/                        ",
];

/// Logo rows fade from cyan into the fog color
const LOGO_TOP: (u8, u8, u8) = (0, 184, 255);
const LOGO_BOTTOM: (u8, u8, u8) = (120, 150, 190);

fn stats_line(app: &AppState) -> Vec<Span<'static>> {
    let state = if app.radar.is_running() {
        Span::styled(
            "RUNNING",
            Style::default().fg(SIGNAL_GREEN).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "STOPPED",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![
        Span::styled(
            format!(
                "   [Endpoints: {}] [Samples: {}] [",
                app.radar.states().len(),
                app.radar.samples_recorded()
            ),
            Style::default().fg(FOG_WHITE),
        ),
        state,
        Span::styled("]", Style::default().fg(FOG_WHITE)),
    ];

    if app.has_feed() || app.feed_samples > 0 {
        let feed_state = if app.has_feed() { "open" } else { "closed" };
        spans.push(Span::styled(
            format!(" [Feed: {} / {} injected]", feed_state, app.feed_samples),
            Style::default().fg(Color::Gray),
        ));
    }

    spans
}

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let logo_style = |row: usize| {
        let ratio = row as f32 / (LOGO.len() - 1) as f32;
        Style::default()
            .fg(interpolate_color(LOGO_TOP, LOGO_BOTTOM, ratio))
            .add_modifier(Modifier::BOLD)
    };

    let banner_text = vec![
        Line::from(vec![Span::styled(LOGO[0], logo_style(0))]),
        Line::from(vec![
            Span::styled(LOGO[1], logo_style(1)),
            Span::styled(
                "   >>> Ping Radar v0.1.0 <<<",
                Style::default().fg(RADAR_CYAN).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(LOGO[2], logo_style(2)),
            Span::styled(
                "   \"Every reply leaves a ripple.\"",
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![Span::styled(LOGO[3], logo_style(3))]),
        Line::from({
            let mut spans = vec![Span::styled(LOGO[4], logo_style(4))];
            spans.extend(stats_line(app));
            spans
        }),
    ];

    let banner = Paragraph::new(banner_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(RADAR_CYAN)),
        )
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
