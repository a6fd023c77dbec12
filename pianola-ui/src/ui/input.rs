use std::time::{Duration, Instant};

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Types of mouse events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    ScrollUp,
    ScrollDown,
}

/// Mouse event with position and type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub column: u16,
    pub row: u16,
}

#[cfg(test)]
impl MouseEvent {
    /// Left button press at (column, row)
    pub fn click(column: u16, row: u16) -> Self {
        Self { kind: MouseEventKind::Down(MouseButton::Left), column, row }
    }
}

/// Top-level input event: keyboard, mouse, or resize
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    Key(InputEvent),
    Mouse(MouseEvent),
    #[allow(dead_code)]
    Resize(u16, u16),
}

/// Key codes the piano cares about. Everything else collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Other,
}

/// Modifier key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Input event from the user
#[derive(Debug, Clone, Copy)]
pub struct InputEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    pub timestamp: Instant,
    /// Set by the terminal when it reports key repeats natively
    pub is_repeat: bool,
}

impl InputEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers, timestamp: Instant::now(), is_repeat: false }
    }

    /// Ctrl+C or Ctrl+Q
    pub fn is_quit(&self) -> bool {
        self.modifiers.ctrl && matches!(self.key, KeyCode::Char('c' | 'q' | 'C' | 'Q'))
    }
}

/// Trait for reading input events
pub trait InputSource {
    /// Poll for an input event with a timeout
    /// Returns None if no event is available within the timeout
    fn poll_event(&mut self, timeout: Duration) -> Option<AppEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_chords() {
        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        assert!(InputEvent::new(KeyCode::Char('c'), ctrl).is_quit());
        assert!(InputEvent::new(KeyCode::Char('q'), ctrl).is_quit());
        assert!(!InputEvent::new(KeyCode::Char('q'), Modifiers::default()).is_quit());
        assert!(!InputEvent::new(KeyCode::Escape, ctrl).is_quit());
    }
}
