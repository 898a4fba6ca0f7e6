//! wq-core: Core quiz logic for worldquiz
//!
//! This crate contains the guess tracker and the derived views the
//! front-end consumes. It has no I/O dependencies.

pub mod country;
pub mod effect;
pub mod style;
pub mod tracker;

pub use country::{CountryId, CountryRecord, normalize_guess};
pub use effect::{ACCEPTED_EFFECTS, Effect, GuessEffects, RecordedEffects};
pub use style::{FOUND_FILL, LOCKED_FILL, Rgb, StyleOverride, locked_overrides, style_overrides};
pub use tracker::{Accepted, GuessOutcome, GuessTracker, Progress};
