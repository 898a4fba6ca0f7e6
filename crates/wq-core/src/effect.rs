//! Side effects requested by the tracker

use strum::{Display, EnumIter};

/// Something the front-end must do after an accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Effect {
    /// Fire-and-forget success sound
    #[strum(serialize = "play success cue")]
    PlaySuccessCue,
    /// Empty the text field
    #[strum(serialize = "clear input")]
    ClearInput,
}

/// Effects raised by every accepted guess, in dispatch order
pub const ACCEPTED_EFFECTS: [Effect; 2] = [Effect::PlaySuccessCue, Effect::ClearInput];

/// Receiver for tracker side effects.
///
/// Implemented by the front-end, which owns the audio collaborator and the
/// text input surface.
pub trait GuessEffects {
    fn play_success_cue(&mut self);
    fn clear_input(&mut self);

    /// Dispatch a single effect to the matching method
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::PlaySuccessCue => self.play_success_cue(),
            Effect::ClearInput => self.clear_input(),
        }
    }
}

/// Records effects instead of performing them. Useful in tests and
/// headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordedEffects {
    pub applied: Vec<Effect>,
}

impl GuessEffects for RecordedEffects {
    fn play_success_cue(&mut self) {
        self.applied.push(Effect::PlaySuccessCue);
    }

    fn clear_input(&mut self) {
        self.applied.push(Effect::ClearInput);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_apply_dispatches_every_effect() {
        let mut recorded = RecordedEffects::default();
        for effect in Effect::iter() {
            recorded.apply(effect);
        }
        assert_eq!(recorded.applied, ACCEPTED_EFFECTS);
    }

    #[test]
    fn test_effect_display() {
        assert_eq!(Effect::PlaySuccessCue.to_string(), "play success cue");
        assert_eq!(Effect::ClearInput.to_string(), "clear input");
    }
}
