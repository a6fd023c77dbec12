pub mod playback;
pub mod selection;

pub use playback::{PassStep, PlaybackPass, PlaybackState};
pub use selection::Selection;

pub use pianola_types::{PitchClass, PitchLabel, RecordedEvent, RecordingBuffer};

/// Message shown before the first activation.
pub const WELCOME_MESSAGE: &str = "Pick a note with Up/Down, play it with Space";

/// Startup values that come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDefaults {
    pub start_note: PitchClass,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self { start_note: PitchClass::G }
    }
}

/// Audio engine lifecycle. The only transition is `Uninitialized -> Ready`,
/// taken once per session by the activation gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineLifecycle {
    #[default]
    Uninitialized,
    Ready,
}

/// Session state, owned by the runtime and passed to the view by reference.
/// Mutated only through `dispatch::dispatch_action`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub selection: Selection,
    pub recording: RecordingBuffer,
    pub lifecycle: EngineLifecycle,
    pub playback: PlaybackState,
    /// Current message line
    pub message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new_with_defaults(SessionDefaults::default())
    }
}

impl AppState {
    pub fn new_with_defaults(defaults: SessionDefaults) -> Self {
        Self {
            selection: Selection::new(defaults.start_note.index()),
            recording: RecordingBuffer::new(),
            lifecycle: EngineLifecycle::Uninitialized,
            playback: PlaybackState::Idle,
            message: WELCOME_MESSAGE.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == EngineLifecycle::Ready
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Whether the manual play control is enabled
    pub fn can_play(&self) -> bool {
        self.is_ready() && !self.is_playing() && !self.recording.is_empty()
    }

    /// Whether the manual reset control is enabled
    pub fn can_reset(&self) -> bool {
        !self.recording.is_empty()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }
}
