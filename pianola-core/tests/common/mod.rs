#![allow(dead_code)]
//! Test harness for pianola-core integration tests.
//!
//! `TestSession` wires router, dispatch and side-effect application together
//! the same way the terminal runtime does, but against a fake clock and an
//! output that records what it was asked to play.

use std::time::{Duration, Instant};

use pianola_audio::NoteOutput;
use pianola_core::action::{Action, DispatchResult, KeyInput, PianoKey};
use pianola_core::dispatch::{apply_side_effects, dispatch_action};
use pianola_core::router::route;
use pianola_core::state::AppState;
use pianola_types::PitchLabel;

/// Output double that remembers every trigger.
#[derive(Default)]
pub struct RecordingOutput {
    pub ready: bool,
    /// Number of upcoming unlock calls that should fail
    pub failing_unlocks: usize,
    pub unlock_calls: usize,
    pub played: Vec<(PitchLabel, Duration)>,
}

impl NoteOutput for RecordingOutput {
    fn unlock(&mut self) -> Result<(), String> {
        self.unlock_calls += 1;
        if self.failing_unlocks > 0 {
            self.failing_unlocks -= 1;
            return Err("device busy".to_string());
        }
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn trigger_note(&mut self, pitch: PitchLabel, duration: Duration) {
        if self.ready {
            self.played.push((pitch, duration));
        }
    }

    fn dispose(&mut self) {
        self.ready = false;
    }
}

pub struct TestSession {
    pub state: AppState,
    pub output: RecordingOutput,
    pub start: Instant,
    pub now: Instant,
    /// Offset from `start` of every trigger, parallel to `output.played`
    pub trigger_times: Vec<Duration>,
}

impl TestSession {
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            state: AppState::default(),
            output: RecordingOutput::default(),
            start,
            now: start,
            trigger_times: Vec::new(),
        }
    }

    /// Session that has already seen the activation press.
    pub fn activated() -> Self {
        let mut session = Self::new();
        session.press(PianoKey::Space);
        assert!(session.state.is_ready());
        session
    }

    pub fn press(&mut self, key: PianoKey) -> DispatchResult {
        self.key(KeyInput::press(key))
    }

    pub fn hold(&mut self, key: PianoKey) -> DispatchResult {
        self.key(KeyInput::repeat(key))
    }

    pub fn key(&mut self, input: KeyInput) -> DispatchResult {
        let action = route(&input, &self.state);
        self.dispatch(action)
    }

    /// Dispatch, apply effects, and feed engine feedback back in.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let mut effects = Vec::new();
        let mut result = dispatch_action(&action, &mut self.state, &mut effects, self.now);

        let before = self.output.played.len();
        let feedback = apply_side_effects(&effects, &mut self.output);
        let fired = self.output.played.len() - before;
        let offset = self.now.duration_since(self.start);
        self.trigger_times.extend(std::iter::repeat(offset).take(fired));

        for follow_up in feedback {
            result.merge(self.dispatch(follow_up));
        }
        result
    }

    /// Move the clock forward in `step` increments, ticking the sequencer.
    pub fn advance(&mut self, total: Duration, step: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            self.now += step;
            elapsed += step;
            self.dispatch(Action::Tick);
        }
    }

    /// Tick in 10ms steps until playback stops. Panics after 60 simulated seconds.
    pub fn run_until_idle(&mut self) {
        let step = Duration::from_millis(10);
        let deadline = self.now + Duration::from_secs(60);
        while self.state.is_playing() {
            assert!(self.now < deadline, "playback never finished");
            self.now += step;
            self.dispatch(Action::Tick);
        }
    }

    pub fn played_labels(&self) -> Vec<String> {
        self.output.played.iter().map(|(p, _)| p.to_string()).collect()
    }

    pub fn recorded_labels(&self) -> Vec<String> {
        self.state.recording.iter().map(|e| e.pitch.to_string()).collect()
    }
}
