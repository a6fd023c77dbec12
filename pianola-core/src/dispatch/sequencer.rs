//! Playback sequencer: replays the recording one note per fixed step.
//!
//! Captured timestamps are not consulted; every note is followed by the same
//! `STEP_INTERVAL`, and the pass ends one interval after its last note.

use std::time::{Duration, Instant};

use pianola_types::{DispatchResult, NoteDuration};

use crate::state::{AppState, PassStep, PlaybackPass, PlaybackState};

use super::side_effects::AudioSideEffect;

/// Gap between consecutive notes of a playback pass
pub const STEP_INTERVAL: Duration = Duration::from_millis(300);

/// Note value every trigger sounds for
pub const TRIGGER_NOTE: NoteDuration = NoteDuration::Eighth;

pub const PLAYING_MESSAGE: &str = "Playing...";
pub const COMPLETE_MESSAGE: &str = "Playback complete! Keep recording.";

pub fn trigger_duration() -> Duration {
    TRIGGER_NOTE.as_duration(NoteDuration::DEFAULT_BPM)
}

/// Start a pass over a snapshot of the recording.
///
/// Returns false (and changes nothing) when the engine is not ready, the
/// recording is empty, or a pass is already running.
pub(super) fn start(
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    now: Instant,
) -> bool {
    if !state.is_ready() || state.recording.is_empty() || state.is_playing() {
        log::debug!(
            target: "sequencer",
            "play ignored (ready={}, len={}, playing={})",
            state.is_ready(),
            state.recording.len(),
            state.is_playing()
        );
        return false;
    }

    let notes = state.recording.labels();
    log::info!(target: "sequencer", "playback started ({} notes)", notes.len());
    state.playback = PlaybackState::Playing(PlaybackPass::new(notes, now));
    state.set_message(PLAYING_MESSAGE);

    // First note sounds immediately
    advance(state, effects, now);
    true
}

/// Move the running pass forward to `now`. At most one note per call.
pub(super) fn advance(
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    now: Instant,
) -> DispatchResult {
    let PlaybackState::Playing(pass) = &mut state.playback else {
        return DispatchResult::none();
    };

    match pass.step(now, STEP_INTERVAL) {
        PassStep::Waiting => DispatchResult::none(),
        PassStep::Note(pitch) => {
            log::debug!(target: "sequencer", "step {} -> {}", pass.position(), pitch);
            effects.push(AudioSideEffect::Trigger { pitch, duration: trigger_duration() });
            DispatchResult::changed()
        }
        PassStep::Finished => {
            log::info!(target: "sequencer", "playback complete ({} notes)", pass.notes().len());
            state.playback = PlaybackState::Idle;
            state.set_message(COMPLETE_MESSAGE);
            DispatchResult::changed()
        }
    }
}
