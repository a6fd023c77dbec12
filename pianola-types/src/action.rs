//! Action types for the dispatch system.

/// Result of asking the audio engine to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineFeedback {
    Unlocked,
    UnlockFailed(String),
}

/// Everything that can change session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// First Space press: ask the engine to unlock.
    Activate,
    SelectUp,
    SelectDown,
    /// Direct selection (mouse click on a key). Clamped to the scale.
    SelectNote(usize),
    TriggerAndRecord,
    Play,
    Reset,
    /// Advance the playback sequencer to the current time.
    Tick,
    Engine(EngineFeedback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Transient notice returned from dispatch, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
    pub status: Vec<StatusEvent>,
    /// State visible to the view changed; the UI should redraw.
    pub changed: bool,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_quit() -> Self {
        Self { quit: true, ..Self::default() }
    }

    pub fn changed() -> Self {
        Self { changed: true, ..Self::default() }
    }

    pub fn push_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status.push(StatusEvent { level, message: message.into() });
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.quit = self.quit || other.quit;
        self.changed = self.changed || other.changed;
        self.status.extend(other.status);
    }
}
