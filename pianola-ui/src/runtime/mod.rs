//! App runtime coordinator.
//!
//! - `input`: event polling, key routing, mouse hit-testing
//! - `render`: FPS throttle and frame rendering
//!
//! Everything runs on one thread. Playback advances on `Action::Tick`, which
//! is dispatched once per loop iteration, so the loop never sleeps longer
//! than the input poll timeout.

mod input;
mod render;

use std::time::Instant;

use pianola_audio::NoteOutput;
use pianola_core::action::{Action, DispatchResult};
use pianola_core::config::Config;
use pianola_core::dispatch::{apply_side_effects, dispatch_action};
use pianola_core::state::AppState;

use crate::panes::PianoPane;
use crate::setup;
use crate::ui::{Frame, HeldKeys, Pane, RatatuiBackend, Rect};

/// Command-line switches that reach the runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub no_audio: bool,
}

/// Top-level runtime that owns the session state, the audio output and the
/// view, and drives the event loop.
pub struct AppRuntime {
    pub(crate) state: AppState,
    pub(crate) output: Box<dyn NoteOutput>,
    pub(crate) pane: Box<dyn Pane>,
    pub(crate) app_frame: Frame,
    pub(crate) held_keys: HeldKeys,
    /// Terminal reports key repeats itself (kitty keyboard protocol)
    pub(crate) native_repeats: bool,

    // Per-frame state
    pub(crate) render_needed: bool,
    pub(crate) status_shown: bool,
    pub(crate) last_render_time: Instant,
    pub(crate) last_area: Rect,
}

impl AppRuntime {
    pub fn new(config: &Config, output: Box<dyn NoteOutput>) -> Self {
        Self {
            state: AppState::new_with_defaults(config.defaults()),
            output,
            pane: Box::new(PianoPane::new()),
            app_frame: Frame::new(),
            held_keys: HeldKeys::new(config.repeat_window(), config.initial_repeat_delay()),
            native_repeats: false,
            render_needed: true,
            status_shown: false,
            last_render_time: Instant::now(),
            last_area: Rect::new(0, 0, 80, 30),
        }
    }

    pub fn set_native_repeats(&mut self, enabled: bool) {
        self.native_repeats = enabled;
    }

    /// Main event loop.
    pub fn run(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        loop {
            if self.process_events(backend)? {
                break;
            }
            if self.process_tick(Instant::now()) {
                break;
            }
            self.maybe_render(backend)?;
        }
        log::info!(
            target: "input",
            "session ended with {} recorded notes",
            self.state.recording.len()
        );
        Ok(())
    }

    /// Dispatch an action, apply its audio effects and feed the engine's
    /// answers back in. Returns true if the app should quit.
    pub(crate) fn dispatch(&mut self, action: &Action, now: Instant) -> bool {
        if matches!(action, Action::None) {
            return false;
        }
        let mut effects = Vec::new();
        let result = dispatch_action(action, &mut self.state, &mut effects, now);
        let feedback = apply_side_effects(&effects, self.output.as_mut());

        let mut quit = self.apply_result(result);
        for follow_up in &feedback {
            quit |= self.dispatch(follow_up, now);
        }
        quit
    }

    fn apply_result(&mut self, result: DispatchResult) -> bool {
        if result.changed {
            self.render_needed = true;
        }
        for event in result.status {
            self.app_frame.status_bar.push(event.message, event.level);
            self.render_needed = true;
        }
        result.quit
    }

    /// Time-based work: held-key expiry and the playback sequencer.
    pub(crate) fn process_tick(&mut self, now: Instant) -> bool {
        if !self.native_repeats {
            self.held_keys.check_releases(now);
        }
        self.dispatch(&Action::Tick, now)
    }
}

impl Drop for AppRuntime {
    fn drop(&mut self) {
        self.output.dispose();
    }
}

/// Public entry point: build the output, then run until quit.
pub fn run(backend: &mut RatatuiBackend, config: &Config, options: RunOptions) -> std::io::Result<()> {
    let output = setup::create_output(config, options.no_audio);
    let mut runtime = AppRuntime::new(config, output);
    runtime.app_frame.device_label = Some(setup::device_label(config, options.no_audio));
    runtime.set_native_repeats(backend.keyboard_enhancement_enabled());
    runtime.run(backend)
}
