mod engine_feedback;
pub mod sequencer;
pub mod side_effects;

pub use engine_feedback::ACTIVATED_MESSAGE;
pub use side_effects::{apply_side_effects, AudioSideEffect};

use std::time::{Instant, SystemTime};

use crate::action::{Action, DispatchResult};
use crate::state::{AppState, RecordedEvent};

pub const RESET_MESSAGE: &str = "Recording cleared";

/// Dispatch an action. Returns a DispatchResult describing what the UI layer
/// has to do next.
///
/// Audio operations are collected into `effects` rather than executed inline;
/// the caller applies them with `apply_side_effects` and dispatches whatever
/// feedback that returns. `now` drives the playback sequencer.
pub fn dispatch_action(
    action: &Action,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    now: Instant,
) -> DispatchResult {
    match action {
        Action::None => DispatchResult::none(),
        Action::Quit => DispatchResult::with_quit(),
        Action::Activate => {
            if !state.is_ready() {
                effects.push(AudioSideEffect::Unlock);
            }
            DispatchResult::none()
        }
        Action::Engine(feedback) => engine_feedback::dispatch_engine_feedback(feedback, state),
        Action::SelectUp => {
            if !state.is_ready() {
                return DispatchResult::none();
            }
            state.selection.up();
            DispatchResult::changed()
        }
        Action::SelectDown => {
            if !state.is_ready() {
                return DispatchResult::none();
            }
            state.selection.down();
            DispatchResult::changed()
        }
        Action::SelectNote(index) => {
            state.selection.set(*index);
            DispatchResult::changed()
        }
        Action::TriggerAndRecord => trigger_and_record(state, effects),
        Action::Play => {
            if sequencer::start(state, effects, now) {
                DispatchResult::changed()
            } else {
                DispatchResult::none()
            }
        }
        Action::Reset => {
            let cleared = state.recording.len();
            state.recording.clear();
            state.set_message(RESET_MESSAGE);
            log::debug!(target: "dispatch", "recording cleared ({} notes)", cleared);
            DispatchResult::changed()
        }
        Action::Tick => sequencer::advance(state, effects, now),
    }
}

fn trigger_and_record(state: &mut AppState, effects: &mut Vec<AudioSideEffect>) -> DispatchResult {
    if !state.is_ready() {
        return DispatchResult::none();
    }
    let pitch = state.selection.pitch();
    effects.push(AudioSideEffect::Trigger {
        pitch,
        duration: sequencer::trigger_duration(),
    });
    state.recording.push(RecordedEvent::new(pitch, SystemTime::now()));
    state.set_message(format!("Added {}", pitch));
    log::debug!(target: "dispatch", "recorded {} (#{})", pitch, state.recording.len());
    DispatchResult::changed()
}
