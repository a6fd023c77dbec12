pub mod commands;
pub mod devices;
pub mod engine;
pub mod voice;

pub use engine::{EngineSettings, SilentEngine, ToneEngine};
pub use voice::{Envelope, Voice, Waveform};

use std::time::Duration;

use pianola_types::PitchLabel;

/// The audio capability the sequencer plays through.
///
/// Implemented by `ToneEngine` (cpal output) and `SilentEngine` (no device).
/// Nothing sounds until `unlock()` has succeeded once.
pub trait NoteOutput {
    /// Open the output and start rendering. Idempotent after the first success.
    fn unlock(&mut self) -> Result<(), String>;

    fn is_ready(&self) -> bool;

    /// Fire-and-forget. A no-op while the engine is not ready.
    fn trigger_note(&mut self, pitch: PitchLabel, duration: Duration);

    /// Release the output device. Safe to call more than once.
    fn dispose(&mut self);
}
