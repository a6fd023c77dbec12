use std::fmt;
use std::time::Duration;

/// The single octave every playable note lives in.
pub const OCTAVE: i8 = 4;

/// Natural pitch class (white keys only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 7] = [
        PitchClass::C,
        PitchClass::D,
        PitchClass::E,
        PitchClass::F,
        PitchClass::G,
        PitchClass::A,
        PitchClass::B,
    ];

    /// Highest valid index into `ALL`.
    pub const MAX_INDEX: usize = Self::ALL.len() - 1;

    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::D => "D",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::G => "G",
            PitchClass::A => "A",
            PitchClass::B => "B",
        }
    }

    /// Semitone offset from C
    pub fn semitone(&self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::D => 2,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::G => 7,
            PitchClass::A => 9,
            PitchClass::B => 11,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PitchClass::C => 0,
            PitchClass::D => 1,
            PitchClass::E => 2,
            PitchClass::F => 3,
            PitchClass::G => 4,
            PitchClass::A => 5,
            PitchClass::B => 6,
        }
    }

    /// Index is clamped into 0..=6.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::MAX_INDEX)]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|pc| pc.name().eq_ignore_ascii_case(name))
    }
}

/// A playable tone: pitch class plus octave, displayed as e.g. "C4".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchLabel {
    pub class: PitchClass,
    pub octave: i8,
}

impl PitchLabel {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// Label at the fixed playing octave.
    pub fn at_default_octave(class: PitchClass) -> Self {
        Self::new(class, OCTAVE)
    }

    /// MIDI note number (C4 = 60)
    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.class.semitone()
    }

    /// Equal-tempered frequency relative to the given A4 tuning.
    pub fn frequency(&self, tuning_a4: f32) -> f32 {
        tuning_a4 * 2.0_f32.powf((self.midi() - 69) as f32 / 12.0)
    }
}

impl fmt::Display for PitchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

/// Note value in "8n" notation (eighth note).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteDuration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    /// Tempo the note values are measured against.
    pub const DEFAULT_BPM: f32 = 120.0;

    pub fn notation(&self) -> &'static str {
        match self {
            NoteDuration::Whole => "1n",
            NoteDuration::Half => "2n",
            NoteDuration::Quarter => "4n",
            NoteDuration::Eighth => "8n",
            NoteDuration::Sixteenth => "16n",
        }
    }

    /// Length in beats (quarter note = 1 beat)
    pub fn beats(&self) -> f32 {
        match self {
            NoteDuration::Whole => 4.0,
            NoteDuration::Half => 2.0,
            NoteDuration::Quarter => 1.0,
            NoteDuration::Eighth => 0.5,
            NoteDuration::Sixteenth => 0.25,
        }
    }

    pub fn as_duration(&self, bpm: f32) -> Duration {
        Duration::from_secs_f32(self.beats() * 60.0 / bpm.max(1.0))
    }
}
