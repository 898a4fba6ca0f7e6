//! Custom ratatui widgets

mod confetti;
mod map;
mod status;

pub use confetti::{Confetti, ConfettiWidget, Particle};
pub use map::MapWidget;
pub use status::{GuessBarWidget, PLACEHOLDER, StatusWidget};
