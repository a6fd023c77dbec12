use std::time::SystemTime;

use crate::music::PitchLabel;

/// One captured key press. `captured_at` is kept for display and logging;
/// playback uses a fixed step instead of the captured spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub pitch: PitchLabel,
    pub captured_at: SystemTime,
}

impl RecordedEvent {
    pub fn new(pitch: PitchLabel, captured_at: SystemTime) -> Self {
        Self { pitch, captured_at }
    }
}

/// Ordered take of recorded notes. Append-only until cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingBuffer {
    events: Vec<RecordedEvent>,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RecordedEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.events.iter()
    }

    /// Pitch labels in insertion order
    pub fn labels(&self) -> Vec<PitchLabel> {
        self.events.iter().map(|e| e.pitch).collect()
    }
}
