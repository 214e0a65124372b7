// Theme module - Color constants and theme re-exports
//
// This module provides the color palette for the radar UI. The renderers only
// emit abstract Paint roles; the functions in `default` map those roles to
// terminal colors.

pub mod default;

use ratatui::style::Color;

/// Primary accent color - borders, titles, endpoint list chrome
/// RGB: (0, 184, 255)
pub const RADAR_CYAN: Color = Color::Rgb(0, 184, 255);

/// Good quality (< 60ms)
/// RGB: (32, 209, 138)
pub const SIGNAL_GREEN: Color = Color::Rgb(32, 209, 138);

/// Warn quality (60-149ms)
/// RGB: (245, 194, 66)
pub const SIGNAL_AMBER: Color = Color::Rgb(245, 194, 66);

/// Bad quality (>= 150ms or lost)
/// RGB: (255, 95, 95)
pub const SIGNAL_RED: Color = Color::Rgb(255, 95, 95);

/// Neutral text and endpoint dots
/// RGB: (220, 224, 235)
pub const FOG_WHITE: Color = Color::Rgb(220, 224, 235);

/// Panel background used as the fade target for ripples
pub const BACKGROUND_RGB: (u8, u8, u8) = (12, 16, 24);

pub use default::*;
