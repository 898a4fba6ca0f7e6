//! Color conversion between core colors and the terminal

use ratatui::style::Color;
use wq_core::Rgb;

/// Convert a core color to a ratatui true color
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
