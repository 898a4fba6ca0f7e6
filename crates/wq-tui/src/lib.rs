//! wq-tui: Terminal UI layer using ratatui
//!
//! Provides the terminal interface for the quiz: the guess field, the
//! world map, the progress counter and the end-of-game celebration.

pub mod app;
pub mod audio;
pub mod display;
pub mod input;
pub mod terminal;
pub mod theme;
pub mod viewport;
pub mod widgets;

pub use app::App;
pub use audio::{AudioCue, Silent, TerminalBell};
pub use terminal::{CrosstermRawMode, RawMode, TerminalSession};
pub use theme::Theme;
pub use viewport::Viewport;
