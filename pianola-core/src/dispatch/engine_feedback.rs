use pianola_types::{DispatchResult, EngineFeedback, StatusLevel};

use crate::state::{AppState, EngineLifecycle};

pub const ACTIVATED_MESSAGE: &str = "Sound is on. Let's build a melody!";

pub(super) fn dispatch_engine_feedback(
    feedback: &EngineFeedback,
    state: &mut AppState,
) -> DispatchResult {
    match feedback {
        EngineFeedback::Unlocked => {
            if state.lifecycle == EngineLifecycle::Ready {
                return DispatchResult::none();
            }
            state.lifecycle = EngineLifecycle::Ready;
            state.set_message(ACTIVATED_MESSAGE);
            log::info!(target: "audio", "engine unlocked");
            DispatchResult::changed()
        }
        EngineFeedback::UnlockFailed(reason) => {
            log::warn!(target: "audio", "engine unlock failed: {}", reason);
            let mut result = DispatchResult::changed();
            result.push_status(StatusLevel::Error, format!("Audio unavailable: {}", reason));
            result
        }
    }
}
