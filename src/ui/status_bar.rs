// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts, the radar state and
// the current frame interval.

use crate::app::config::DEFAULT_FRAME_MS;
use crate::app::AppState;
use crate::theme::{get_refresh_color, FOG_WHITE, RADAR_CYAN, SIGNAL_GREEN, SIGNAL_RED};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
    color: Color,
}

/// Key hints in display order; the start/stop hint follows the radar state
fn hints(running: bool) -> Vec<Hint> {
    let lifecycle = if running {
        Hint {
            priority: 1,
            key: "X:",
            desc: "Stop | ",
            color: SIGNAL_RED,
        }
    } else {
        Hint {
            priority: 1,
            key: "S:",
            desc: "Start | ",
            color: SIGNAL_GREEN,
        }
    };

    vec![
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
            color: SIGNAL_RED,
        },
        lifecycle,
        Hint {
            priority: 2,
            key: "Space:",
            desc: "Toggle | ",
            color: RADAR_CYAN,
        },
        Hint {
            priority: 2,
            key: "↑↓:",
            desc: "Select | ",
            color: RADAR_CYAN,
        },
        Hint {
            priority: 3,
            key: "+/-:",
            desc: "Frame rate | ",
            color: RADAR_CYAN,
        },
    ]
}

/// Keep hints by priority until `available` columns are used up
fn fit_hints(hints: &[Hint], available: usize) -> Vec<&Hint> {
    let mut used = 0;
    let mut kept = vec![false; hints.len()];
    for priority in 1..=3 {
        for (i, hint) in hints.iter().enumerate() {
            if hint.priority != priority {
                continue;
            }
            let len = hint.key.chars().count() + hint.desc.chars().count();
            if used + len <= available {
                kept[i] = true;
                used += len;
            }
        }
    }
    hints
        .iter()
        .zip(kept)
        .filter_map(|(hint, keep)| keep.then_some(hint))
        .collect()
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let running = app.radar.is_running();

    let (state_label, state_color) = if running {
        ("● RUNNING", SIGNAL_GREEN)
    } else {
        ("○ STOPPED", Color::DarkGray)
    };

    let frame_ms = app.refresh_config.frame_ms;
    let frame_color = get_refresh_color(
        frame_ms,
        DEFAULT_FRAME_MS,
        app.refresh_config.recently_changed(),
    );
    let frame_text = format!("[frame {}ms]", frame_ms);

    // Borders, icon, and the indicators on the right are always shown
    let reserved = 4 + state_label.chars().count() + 2 + frame_text.chars().count();
    let available = usize::from(area.width).saturating_sub(reserved);

    let hints = hints(running);
    let mut spans = vec![Span::styled(" ◎ ", Style::default().fg(RADAR_CYAN))];
    for hint in fit_hints(&hints, available) {
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(hint.desc, Style::default().fg(FOG_WHITE)));
    }

    spans.push(Span::styled(
        state_label,
        Style::default().fg(state_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        frame_text,
        Style::default().fg(frame_color).add_modifier(Modifier::BOLD),
    ));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(RADAR_CYAN)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}
