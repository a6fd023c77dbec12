use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode as CrosstermKeyCode,
        KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent,
        MouseEventKind as CrosstermMouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color as RatatuiColor, Style as RatatuiStyle},
    Terminal,
};

use super::{
    AppEvent, InputEvent, InputSource, KeyCode, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    Rect, RenderBuf,
};

/// Ratatui-based terminal backend
pub struct RatatuiBackend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhancement_enabled: bool,
}

impl RatatuiBackend {
    /// Create a new ratatui backend (does not start terminal mode)
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            keyboard_enhancement_enabled: false,
        })
    }

    /// Enter raw mode and alternate screen with mouse capture
    pub fn start(&mut self) -> io::Result<()> {
        enable_raw_mode()?;

        // Check terminal support BEFORE entering alternate screen
        let supports_enhancement = matches!(supports_keyboard_enhancement(), Ok(true));

        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

        // Enable Kitty keyboard protocol if supported
        if supports_enhancement
            && execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .is_ok()
        {
            self.keyboard_enhancement_enabled = true;
        }

        self.terminal.clear()?;
        Ok(())
    }

    /// Leave raw mode and alternate screen
    pub fn stop(&mut self) -> io::Result<()> {
        // Pop keyboard enhancement flags BEFORE leaving alternate screen
        if self.keyboard_enhancement_enabled {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
            self.keyboard_enhancement_enabled = false;
        }

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Draw one frame. `render` paints into a black-filled buffer covering
    /// the whole terminal; the area it was given is returned for hit-testing.
    pub fn draw<F>(&mut self, render: F) -> io::Result<Rect>
    where
        F: FnOnce(Rect, &mut RenderBuf),
    {
        let mut drawn = Rect::default();
        self.terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();
            let bg_style = RatatuiStyle::default().bg(RatatuiColor::Rgb(0, 0, 0));
            buf.set_style(area, bg_style);
            render(area, &mut RenderBuf::new(buf));
            drawn = area;
        })?;
        Ok(drawn)
    }

    /// Whether the Kitty keyboard protocol was successfully enabled.
    pub fn keyboard_enhancement_enabled(&self) -> bool {
        self.keyboard_enhancement_enabled
    }
}

impl InputSource for RatatuiBackend {
    fn poll_event(&mut self, timeout: Duration) -> Option<AppEvent> {
        let mut t = timeout;
        loop {
            if !event::poll(t).ok()? {
                return None;
            }
            match event::read().ok()? {
                Event::Key(key_event) => {
                    // Release events are not forwarded; held keys are tracked by timeout
                    if key_event.kind == KeyEventKind::Release {
                        t = Duration::ZERO;
                        continue;
                    }
                    return Some(AppEvent::Key(convert_key_event(key_event)));
                }
                Event::Mouse(mouse_event) => {
                    if let Some(me) = convert_mouse_event(mouse_event) {
                        return Some(AppEvent::Mouse(me));
                    }
                    // Moved and friends: keep draining
                    t = Duration::ZERO;
                }
                Event::Resize(w, h) => {
                    return Some(AppEvent::Resize(w, h));
                }
                _ => {
                    // FocusGained, Paste, ...
                    t = Duration::ZERO;
                }
            }
        }
    }
}

fn convert_key_event(event: KeyEvent) -> InputEvent {
    let key = match event.code {
        CrosstermKeyCode::Char(c) => KeyCode::Char(c),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Esc => KeyCode::Escape,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Other,
    };

    let mut input = InputEvent::new(key, convert_modifiers(event.modifiers));
    input.is_repeat = event.kind == KeyEventKind::Repeat;
    input
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
    }
}

fn convert_mouse_button(button: CrosstermMouseButton) -> MouseButton {
    match button {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_mouse_event(event: CrosstermMouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        CrosstermMouseEventKind::Down(btn) => MouseEventKind::Down(convert_mouse_button(btn)),
        CrosstermMouseEventKind::Up(btn) => MouseEventKind::Up(convert_mouse_button(btn)),
        CrosstermMouseEventKind::Drag(btn) => MouseEventKind::Drag(convert_mouse_button(btn)),
        CrosstermMouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        CrosstermMouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None, // Ignore Moved and other events
    };

    Some(MouseEvent {
        kind,
        column: event.column,
        row: event.row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_kind_is_carried() {
        let press = KeyEvent::new_with_kind(
            CrosstermKeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Press,
        );
        let repeat = KeyEvent::new_with_kind(
            CrosstermKeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        );
        assert!(!convert_key_event(press).is_repeat);
        assert!(convert_key_event(repeat).is_repeat);
    }

    #[test]
    fn unhandled_keys_collapse_to_other() {
        let tab = KeyEvent::new(CrosstermKeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(convert_key_event(tab).key, KeyCode::Other);
        let esc = KeyEvent::new(CrosstermKeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(convert_key_event(esc).key, KeyCode::Escape);
    }
}
