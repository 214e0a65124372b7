// Radar panel rendering module
//
// Paints the radar Scene recorded by the last tick onto a Braille canvas and
// labels each endpoint dot with its id.

use crate::app::AppState;
use crate::radar::render::{Scene, Shape, DOT_RADIUS};
use crate::theme::{paint_color, BACKGROUND_RGB, FOG_WHITE, RADAR_CYAN};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, BorderType, Borders,
    },
    Frame,
};

/// Braille resolution per terminal cell
const DOTS_PER_COLUMN: f64 = 2.0;
const DOTS_PER_ROW: f64 = 4.0;

/// Surface size in Braille dots for a canvas area
pub(super) fn surface_size(area: Rect) -> (f64, f64) {
    (
        f64::from(area.width) * DOTS_PER_COLUMN,
        f64::from(area.height) * DOTS_PER_ROW,
    )
}

pub(super) fn background() -> Color {
    let (r, g, b) = BACKGROUND_RGB;
    Color::Rgb(r, g, b)
}

/// Draw a recorded scene onto a canvas whose bounds match the scene size
///
/// Scene coordinates grow downward, canvas coordinates grow upward. Areas are
/// painted first so strokes stay visible on top of fills.
pub(super) fn paint_scene(ctx: &mut Context<'_>, scene: &Scene) {
    let height = scene.height();
    let flip = |y: f64| height - y;

    for shape in scene.shapes() {
        if let Shape::Area { points, paint } = shape {
            let color = paint_color(*paint);
            for pair in points.windows(2) {
                let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
                let steps = (x1 - x0).abs().ceil().max(1.0) as usize;
                for step in 0..=steps {
                    let t = step as f64 / steps as f64;
                    let x = x0 + (x1 - x0) * t;
                    let y = y0 + (y1 - y0) * t;
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: flip(y),
                        color,
                    });
                }
            }
        }
    }

    for shape in scene.shapes() {
        match shape {
            Shape::Circle {
                x,
                y,
                radius,
                paint,
                filled,
            } => {
                let color = paint_color(*paint);
                if *filled {
                    let mut r = *radius;
                    while r >= 1.0 {
                        ctx.draw(&Circle {
                            x: *x,
                            y: flip(*y),
                            radius: r,
                            color,
                        });
                        r -= 1.0;
                    }
                    ctx.draw(&Points {
                        coords: &[(*x, flip(*y))],
                        color,
                    });
                } else {
                    ctx.draw(&Circle {
                        x: *x,
                        y: flip(*y),
                        radius: *radius,
                        color,
                    });
                }
            }
            Shape::Polyline { points, paint } => {
                let color = paint_color(*paint);
                if let [(x, y)] = points.as_slice() {
                    ctx.draw(&Points {
                        coords: &[(*x, flip(*y))],
                        color,
                    });
                }
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: flip(pair[0].1),
                        x2: pair[1].0,
                        y2: flip(pair[1].1),
                        color,
                    });
                }
            }
            Shape::Area { .. } => {}
        }
    }
}

pub fn render_radar_panel(f: &mut Frame, area: Rect, app: &mut AppState) {
    let state_label = if app.radar.is_running() {
        Span::styled(" ● live ", Style::default().fg(crate::theme::SIGNAL_GREEN))
    } else {
        Span::styled(" ○ idle ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RADAR_CYAN))
        .title(vec![
            Span::styled(
                "━ Ping Radar ━",
                Style::default().fg(RADAR_CYAN).add_modifier(Modifier::BOLD),
            ),
            state_label,
        ]);

    let inner = block.inner(area);
    let (width, height) = surface_size(inner);
    app.fit_radar(width, height);

    let scene = app.radar.scene();
    let labels: Vec<(f64, f64, String)> = app
        .radar
        .states()
        .iter()
        .map(|s| (s.x, s.y, s.id().to_string()))
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(background())
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            paint_scene(ctx, scene);
            // Labels go on a separate layer so dots never hide them
            ctx.layer();
            for (x, y, id) in &labels {
                ctx.print(
                    x + DOT_RADIUS + 2.0,
                    height - y,
                    Span::styled(id.clone(), Style::default().fg(FOG_WHITE)),
                );
            }
        });

    f.render_widget(canvas, area);
}
