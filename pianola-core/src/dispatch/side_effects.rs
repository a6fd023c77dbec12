//! AudioSideEffect: audio operations produced by dispatchers.
//!
//! Dispatch functions push side effects into a `Vec<AudioSideEffect>` instead of
//! calling the engine directly, so state transitions stay testable without a
//! sound device.

use std::time::Duration;

use pianola_audio::NoteOutput;
use pianola_types::{Action, EngineFeedback, PitchLabel};

/// A deferred audio operation produced during action dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSideEffect {
    /// Open the output device (activation gesture)
    Unlock,
    Trigger { pitch: PitchLabel, duration: Duration },
}

/// Apply collected side effects to the engine, in order.
///
/// Returns follow-up actions the caller must dispatch (the unlock outcome).
pub fn apply_side_effects(effects: &[AudioSideEffect], engine: &mut dyn NoteOutput) -> Vec<Action> {
    let mut feedback = Vec::new();
    for effect in effects {
        if let Some(action) = apply_one(effect, engine) {
            feedback.push(action);
        }
    }
    feedback
}

fn apply_one(effect: &AudioSideEffect, engine: &mut dyn NoteOutput) -> Option<Action> {
    match effect {
        AudioSideEffect::Unlock => {
            let outcome = match engine.unlock() {
                Ok(()) => EngineFeedback::Unlocked,
                Err(e) => EngineFeedback::UnlockFailed(e),
            };
            Some(Action::Engine(outcome))
        }
        AudioSideEffect::Trigger { pitch, duration } => {
            engine.trigger_note(*pitch, *duration);
            None
        }
    }
}
