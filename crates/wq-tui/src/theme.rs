//! Palettes for dark and light terminals
//!
//! The light palette is picked by `--light`, by `WQ_LIGHT_BG=1`, or when
//! `COLORFGBG` reports a light background.

use ratatui::style::Color;
use wq_core::{FOUND_FILL, LOCKED_FILL};

use crate::display::rgb_color;

/// Colors used by every widget. Widgets never hardcode a `Color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Color,
    /// Key help and placeholder
    pub text_dim: Color,

    pub border: Color,
    /// "All countries found" banner
    pub border_accent: Color,

    // Guess field
    pub input_fg: Color,
    pub input_bg: Color,
    pub input_disabled_bg: Color,
    pub counter_fg: Color,
    pub counter_bg: Color,

    // Map
    /// Outline of a region still to be found
    pub region: Color,
    /// Region whose country has been found
    pub region_found: Color,
    /// Region that is out of play
    pub region_locked: Color,
    /// Outline of the playable region under the mouse
    pub region_hover: Color,
    /// Last clicked region name in the status line
    pub clicked: Color,

    /// Confetti colors, cycled per particle
    pub confetti: [Color; 6],
}

impl Theme {
    /// Default palette
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::Gray,
            border_accent: Color::Yellow,
            input_fg: Color::White,
            input_bg: Color::Gray,
            input_disabled_bg: Color::DarkGray,
            counter_fg: Color::White,
            counter_bg: Color::Black,
            region: Color::Gray,
            region_found: rgb_color(FOUND_FILL),
            region_locked: rgb_color(LOCKED_FILL),
            region_hover: Color::White,
            clicked: Color::Cyan,
            confetti: [
                Color::Red,
                Color::Yellow,
                Color::Green,
                Color::Cyan,
                Color::Magenta,
                Color::LightBlue,
            ],
        }
    }

    /// Palette for light backgrounds
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            input_fg: Color::Black,
            input_bg: Color::Gray,
            input_disabled_bg: Color::DarkGray,
            counter_fg: Color::White,
            counter_bg: Color::DarkGray,
            region: Color::DarkGray,
            region_found: rgb_color(FOUND_FILL),
            region_locked: rgb_color(LOCKED_FILL),
            region_hover: Color::Black,
            clicked: Color::Blue,
            confetti: [
                Color::Red,
                Color::Blue,
                Color::Green,
                Color::Magenta,
                Color::Yellow,
                Color::DarkGray,
            ],
        }
    }

    /// Palette matching the terminal background
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_light_background() -> bool {
        // WQ_LIGHT_BG wins over detection
        if let Ok(val) = std::env::var("WQ_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // "fg;bg" color indices. 7 and 9-15 are light, 8 is bright black.
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
