// Default theme functions
//
// Maps radar paint roles and sample qualities to terminal colors.

use ratatui::style::Color;

use super::{BACKGROUND_RGB, FOG_WHITE, RADAR_CYAN, SIGNAL_AMBER, SIGNAL_GREEN, SIGNAL_RED};
use crate::radar::render::Paint;
use crate::radar::sample::Quality;

/// Faint range rings
const RING_RGB: (u8, u8, u8) = (52, 58, 74);

/// Sparkline stroke and area fill
const SPARK_LINE_RGB: (u8, u8, u8) = (150, 156, 170);
const SPARK_FILL_RGB: (u8, u8, u8) = (18, 60, 72);

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
///
/// # Arguments
/// * `color1` - Starting color as (r, g, b) tuple
/// * `color2` - Ending color as (r, g, b) tuple
/// * `ratio` - Interpolation ratio (0.0 = color1, 1.0 = color2)
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// RGB components of a palette color (falls back to white for named colors)
fn rgb_of(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (255, 255, 255),
    }
}

/// Color for a sample quality
pub fn quality_color(quality: Quality) -> Color {
    match quality {
        Quality::Good => SIGNAL_GREEN,
        Quality::Warn => SIGNAL_AMBER,
        Quality::Bad => SIGNAL_RED,
    }
}

/// Terminal color for a radar paint role
///
/// Ripple opacity has no terminal equivalent, so the quality color is blended
/// toward the panel background instead.
pub fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::RangeRing => {
            let (r, g, b) = RING_RGB;
            Color::Rgb(r, g, b)
        }
        Paint::EndpointDot => FOG_WHITE,
        Paint::Ripple { quality, opacity } => interpolate_color(
            BACKGROUND_RGB,
            rgb_of(quality_color(quality)),
            opacity as f32,
        ),
        Paint::SparkLine => {
            let (r, g, b) = SPARK_LINE_RGB;
            Color::Rgb(r, g, b)
        }
        Paint::SparkFill => {
            let (r, g, b) = SPARK_FILL_RGB;
            Color::Rgb(r, g, b)
        }
    }
}

/// Get color for the frame interval based on its value relative to default
///
/// Color coding:
/// - Cyan: default value
/// - Amber: faster than default (more CPU)
/// - Red: more than twice as fast as default
///
/// If recently_changed is true, returns a brighter version of the color
pub fn get_refresh_color(interval_ms: u64, default_ms: u64, recently_changed: bool) -> Color {
    let base_color = if interval_ms >= default_ms {
        RADAR_CYAN
    } else {
        let ratio = (default_ms - interval_ms) as f32 / default_ms as f32;
        if ratio >= 0.5 {
            SIGNAL_RED
        } else {
            SIGNAL_AMBER
        }
    };

    // If recently changed, make the color brighter
    if recently_changed {
        match base_color {
            Color::Rgb(r, g, b) => {
                // Increase brightness by 20%
                let r = ((r as f32 * 1.2).min(255.0)) as u8;
                let g = ((g as f32 * 1.2).min(255.0)) as u8;
                let b = ((b as f32 * 1.2).min(255.0)) as u8;
                Color::Rgb(r, g, b)
            }
            _ => base_color,
        }
    } else {
        base_color
    }
}
