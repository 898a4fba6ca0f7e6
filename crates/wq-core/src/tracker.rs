//! Guess tracker
//!
//! Owns the countries still to be found and the ids found so far, and moves
//! at most one country between them per submitted guess.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info};

use crate::country::{CountryId, CountryRecord, normalize_guess};
use crate::effect::{ACCEPTED_EFFECTS, Effect, GuessEffects};

/// Result of a single `submit_guess` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess named a remaining country
    Accepted(Accepted),
    /// No remaining country accepts this text; nothing changed
    Rejected,
    /// Another guess is still in flight; this one was dropped
    Dropped,
    /// Every country has already been found
    GameOver,
}

impl GuessOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GuessOutcome::Accepted(_))
    }
}

/// An accepted guess and the effects the caller must apply before settling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub id: CountryId,
    pub effects: Vec<Effect>,
}

/// Found / total counter shown next to the input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub found: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.found == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.found, self.total)
    }
}

/// Session state of the quiz
#[derive(Debug, Clone)]
pub struct GuessTracker {
    /// Unguessed countries, in dataset order
    remaining: Vec<CountryRecord>,
    /// Guessed ids, in guess order
    guessed: Vec<CountryId>,
    /// Number of unlocked countries at start
    total: usize,
    /// Set while an accepted guess has effects pending
    in_flight: bool,
}

impl GuessTracker {
    /// Create a tracker over the given records.
    ///
    /// Locked records are skipped and only the first record for each id is
    /// kept, so `remaining` starts as the unique unlocked countries.
    pub fn new(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        let mut seen = HashSet::new();
        let remaining: Vec<CountryRecord> = records
            .into_iter()
            .filter(CountryRecord::is_unlocked)
            .filter(|record| seen.insert(record.id.clone()))
            .collect();
        let total = remaining.len();
        info!(total, "guess tracker initialized");

        Self {
            remaining,
            guessed: Vec::with_capacity(total),
            total,
            in_flight: false,
        }
    }

    /// Countries not yet guessed, in the order used for matching
    pub fn remaining(&self) -> &[CountryRecord] {
        &self.remaining
    }

    /// Guessed ids, oldest first
    pub fn guessed(&self) -> &[CountryId] {
        &self.guessed
    }

    /// Number of unlocked countries in play
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn progress(&self) -> Progress {
        Progress {
            found: self.guessed.len(),
            total: self.total,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_guessed(&self, id: &str) -> bool {
        self.guessed.iter().any(|guessed| guessed == id)
    }

    /// Check a guess and, if it names a remaining country, move that
    /// country to `guessed`.
    ///
    /// An accepted guess leaves the tracker in flight until [`settle`] is
    /// called; any guess submitted in between is dropped.
    ///
    /// [`settle`]: GuessTracker::settle
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.in_flight {
            debug!("guess dropped, previous guess still in flight");
            return GuessOutcome::Dropped;
        }
        if self.is_game_over() {
            return GuessOutcome::GameOver;
        }

        let normalized = normalize_guess(raw);
        let Some(index) = self.remaining.iter().position(|c| c.accepts(&normalized)) else {
            return GuessOutcome::Rejected;
        };

        self.in_flight = true;
        let record = self.remaining.remove(index);
        debug!(id = %record.id, name = %record.canonical_name, "guess accepted");
        self.guessed.push(record.id.clone());

        if self.is_game_over() {
            info!(total = self.total, "all countries found");
        }

        GuessOutcome::Accepted(Accepted {
            id: record.id,
            effects: ACCEPTED_EFFECTS.to_vec(),
        })
    }

    /// Mark the effects of the last accepted guess as applied
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    /// Submit a guess, apply its effects and settle, in one step.
    ///
    /// This is what an input-change handler calls.
    pub fn submit_and_apply(&mut self, raw: &str, effects: &mut impl GuessEffects) -> GuessOutcome {
        let outcome = self.submit_guess(raw);
        if let GuessOutcome::Accepted(accepted) = &outcome {
            for effect in &accepted.effects {
                effects.apply(*effect);
            }
            self.settle();
        }
        outcome
    }
}
