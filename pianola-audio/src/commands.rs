//! Messages from the engine handle to the audio callback.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceCmd {
    /// Start (or retrigger) the voice; release begins after `hold`.
    NoteOn { freq: f32, hold: Duration },
}
