//! Input router: maps one key press to at most one action.

use pianola_types::{Action, KeyInput, PianoKey};

use crate::state::AppState;

/// Resolve a key press against the current state.
///
/// Before the engine is unlocked only Space does anything (it activates).
/// Held-Space auto-repeat never records.
pub fn route(input: &KeyInput, state: &AppState) -> Action {
    if !state.is_ready() {
        return match input.key {
            PianoKey::Space => Action::Activate,
            _ => Action::None,
        };
    }

    match input.key {
        PianoKey::Up => Action::SelectUp,
        PianoKey::Down => Action::SelectDown,
        PianoKey::Space if input.is_repeat => Action::None,
        PianoKey::Space => Action::TriggerAndRecord,
        PianoKey::Enter => Action::Play,
        PianoKey::Escape => Action::Reset,
        PianoKey::Other => Action::None,
    }
}
