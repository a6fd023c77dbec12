/// The keys the piano reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PianoKey {
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Other,
}

/// A key press as seen by the input router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: PianoKey,
    /// True for auto-repeat events generated while the key is held.
    pub is_repeat: bool,
}

impl KeyInput {
    pub fn press(key: PianoKey) -> Self {
        Self { key, is_repeat: false }
    }

    pub fn repeat(key: PianoKey) -> Self {
        Self { key, is_repeat: true }
    }
}
