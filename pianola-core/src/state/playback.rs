use std::time::Instant;

use pianola_types::PitchLabel;

/// One playback run over a snapshot of the recording.
///
/// The snapshot is taken when the pass starts, so clearing the recording
/// mid-pass does not change what is played.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackPass {
    notes: Vec<PitchLabel>,
    /// Index of the next note to trigger; `notes.len()` means only the
    /// trailing gap is left.
    next: usize,
    /// When the next step (note or completion) is due
    due: Instant,
}

/// What `PlaybackPass::step` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStep {
    /// Not due yet
    Waiting,
    /// Trigger this note; the pass continues
    Note(PitchLabel),
    /// The final gap has elapsed
    Finished,
}

impl PlaybackPass {
    pub fn new(notes: Vec<PitchLabel>, start: Instant) -> Self {
        Self { notes, next: 0, due: start }
    }

    pub fn notes(&self) -> &[PitchLabel] {
        &self.notes
    }

    /// Number of notes already triggered
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    /// Take at most one step. After a note the next step is scheduled
    /// `gap` after `now`.
    pub fn step(&mut self, now: Instant, gap: std::time::Duration) -> PassStep {
        if now < self.due {
            return PassStep::Waiting;
        }
        match self.notes.get(self.next).copied() {
            Some(note) => {
                self.next += 1;
                self.due = now + gap;
                PassStep::Note(note)
            }
            None => PassStep::Finished,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(PlaybackPass),
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }

    pub fn pass(&self) -> Option<&PlaybackPass> {
        match self {
            PlaybackState::Playing(pass) => Some(pass),
            PlaybackState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pianola_types::PitchClass;
    use std::time::Duration;

    const GAP: Duration = Duration::from_millis(300);

    fn label(pc: PitchClass) -> PitchLabel {
        PitchLabel::at_default_octave(pc)
    }

    #[test]
    fn steps_through_notes_then_finishes() {
        let t0 = Instant::now();
        let mut pass = PlaybackPass::new(vec![label(PitchClass::C), label(PitchClass::E)], t0);

        assert_eq!(pass.step(t0, GAP), PassStep::Note(label(PitchClass::C)));
        assert_eq!(pass.step(t0 + Duration::from_millis(299), GAP), PassStep::Waiting);
        assert_eq!(pass.step(t0 + GAP, GAP), PassStep::Note(label(PitchClass::E)));
        assert_eq!(pass.position(), 2);
        assert_eq!(pass.step(t0 + GAP + Duration::from_millis(100), GAP), PassStep::Waiting);
        assert_eq!(pass.step(t0 + GAP * 2, GAP), PassStep::Finished);
    }

    #[test]
    fn one_step_per_call_even_when_late() {
        let t0 = Instant::now();
        let mut pass = PlaybackPass::new(vec![label(PitchClass::C); 3], t0);
        let late = t0 + Duration::from_secs(5);
        assert!(matches!(pass.step(late, GAP), PassStep::Note(_)));
        assert_eq!(pass.position(), 1);
        assert_eq!(pass.due(), late + GAP);
    }

    #[test]
    fn idle_has_no_pass() {
        let state = PlaybackState::default();
        assert!(!state.is_playing());
        assert!(state.pass().is_none());
    }
}
