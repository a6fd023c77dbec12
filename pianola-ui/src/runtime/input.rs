//! Input processing: event polling, repeat detection, key routing, pane mouse handling.

use std::time::{Duration, Instant};

use pianola_core::action::{Action, KeyInput, PianoKey};
use pianola_core::router::route;

use super::AppRuntime;
use crate::ui::{AppEvent, InputEvent, InputSource, KeyCode, RatatuiBackend};

/// Upper bound on events handled per loop iteration, so ticks and frames
/// still happen under an input flood.
const MAX_EVENTS_PER_FRAME: u8 = 16;

impl AppRuntime {
    /// Process input events. Returns true if the app should quit.
    pub(crate) fn process_events(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<bool> {
        let mut events_processed = 0u8;

        loop {
            let timeout = if events_processed == 0 {
                Duration::from_millis(2)
            } else {
                Duration::ZERO
            };
            let app_event = match backend.poll_event(timeout) {
                Some(e) => e,
                None => break,
            };
            events_processed += 1;

            let action = match app_event {
                AppEvent::Resize(_, _) => {
                    self.render_needed = true;
                    Action::None
                }
                AppEvent::Mouse(mouse_event) => {
                    self.pane.handle_mouse(&mouse_event, self.last_area, &self.state)
                }
                AppEvent::Key(event) => self.key_action(&event),
            };

            if self.dispatch(&action, Instant::now()) {
                return Ok(true);
            }
            if events_processed >= MAX_EVENTS_PER_FRAME {
                break;
            }
        }
        Ok(false)
    }

    /// Turn a key event into an action: quit chords first, then the router.
    pub(crate) fn key_action(&mut self, event: &InputEvent) -> Action {
        if event.is_quit() {
            return Action::Quit;
        }

        let is_repeat = if self.native_repeats {
            event.is_repeat
        } else {
            self.held_keys.key_pressed(event.key, event.timestamp)
        };
        let input = KeyInput { key: piano_key(event.key), is_repeat };
        let action = route(&input, &self.state);
        log::debug!(target: "input", "{:?} (repeat={}) -> {:?}", input.key, is_repeat, action);
        action
    }
}

fn piano_key(code: KeyCode) -> PianoKey {
    match code {
        KeyCode::Up => PianoKey::Up,
        KeyCode::Down => PianoKey::Down,
        KeyCode::Char(' ') => PianoKey::Space,
        KeyCode::Enter => PianoKey::Enter,
        KeyCode::Escape => PianoKey::Escape,
        _ => PianoKey::Other,
    }
}
