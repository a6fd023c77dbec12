//! Monophonic synth voice rendered inside the output callback.

use std::f32::consts::PI;
use std::time::Duration;

use crate::commands::VoiceCmd;

/// Oscillator waveforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    #[default]
    Triangle,
    Square,
    Saw,
}

impl Waveform {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sine" => Some(Waveform::Sine),
            "triangle" | "tri" => Some(Waveform::Triangle),
            "square" => Some(Waveform::Square),
            "saw" | "sawtooth" => Some(Waveform::Saw),
            _ => None,
        }
    }

    /// Sample at `phase` in [0, 1)
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Linear ADSR envelope, advanced one sample at a time.
#[derive(Debug, Clone)]
pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    sample_rate: f32,
    stage: Stage,
    level: f32,
    release_step: f32,
}

impl Envelope {
    /// Times in seconds, sustain as a level in [0, 1].
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32, sample_rate: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
            sample_rate: sample_rate.max(1.0),
            stage: Stage::Idle,
            level: 0.0,
            release_step: 0.0,
        }
    }

    /// Default synth shape: 5ms attack, 100ms decay, 0.3 sustain, 1s release.
    pub fn synth_default(sample_rate: f32) -> Self {
        Self::new(0.005, 0.1, 0.3, 1.0, sample_rate)
    }

    pub fn gate_on(&mut self) {
        self.stage = Stage::Attack;
    }

    pub fn gate_off(&mut self) {
        if self.stage == Stage::Idle {
            return;
        }
        let samples = (self.release * self.sample_rate).max(1.0);
        self.release_step = self.level / samples;
        self.stage = Stage::Release;
    }

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn next(&mut self) -> f32 {
        match self.stage {
            Stage::Idle => {
                self.level = 0.0;
            }
            Stage::Attack => {
                let samples = (self.attack * self.sample_rate).max(1.0);
                self.level += 1.0 / samples;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                let samples = (self.decay * self.sample_rate).max(1.0);
                self.level -= (1.0 - self.sustain) / samples;
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = Stage::Sustain;
                }
            }
            Stage::Sustain => {
                self.level = self.sustain;
            }
            Stage::Release => {
                self.level -= self.release_step;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = Stage::Idle;
                }
            }
        }
        self.level
    }
}

/// One oscillator through one envelope. Retriggering a sounding voice
/// restarts the attack from the current level, so there is no click.
pub struct Voice {
    waveform: Waveform,
    volume: f32,
    sample_rate: f32,
    freq: f32,
    phase: f32,
    envelope: Envelope,
    hold_remaining: u64,
}

impl Voice {
    pub fn new(waveform: Waveform, volume: f32, sample_rate: f32) -> Self {
        Self {
            waveform,
            volume: volume.clamp(0.0, 1.0),
            sample_rate: sample_rate.max(1.0),
            freq: 0.0,
            phase: 0.0,
            envelope: Envelope::synth_default(sample_rate),
            hold_remaining: 0,
        }
    }

    pub fn apply(&mut self, cmd: VoiceCmd) {
        match cmd {
            VoiceCmd::NoteOn { freq, hold } => self.note_on(freq, hold),
        }
    }

    pub fn note_on(&mut self, freq: f32, hold: Duration) {
        self.freq = freq;
        // At least one sample, or the gate would never close
        self.hold_remaining = ((hold.as_secs_f32() * self.sample_rate) as u64).max(1);
        self.envelope.gate_on();
    }

    pub fn is_sounding(&self) -> bool {
        !self.envelope.is_idle()
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.hold_remaining > 0 {
            self.hold_remaining -= 1;
            if self.hold_remaining == 0 {
                self.envelope.gate_off();
            }
        }
        let env = self.envelope.next();
        if env == 0.0 && self.envelope.is_idle() {
            return 0.0;
        }
        let out = self.waveform.sample(self.phase) * env * self.volume;
        self.phase += self.freq / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
        out.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 1000.0;

    #[test]
    fn waveform_names() {
        assert_eq!(Waveform::from_name("Triangle"), Some(Waveform::Triangle));
        assert_eq!(Waveform::from_name("sawtooth"), Some(Waveform::Saw));
        assert_eq!(Waveform::from_name("noise"), None);
    }

    #[test]
    fn triangle_shape() {
        assert_eq!(Waveform::Triangle.sample(0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.25), 0.0);
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
    }

    #[test]
    fn envelope_reaches_sustain() {
        let mut env = Envelope::new(0.01, 0.01, 0.5, 0.01, SR);
        env.gate_on();
        for _ in 0..100 {
            env.next();
        }
        assert!((env.level() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn envelope_release_goes_idle() {
        let mut env = Envelope::new(0.001, 0.001, 0.5, 0.01, SR);
        env.gate_on();
        for _ in 0..10 {
            env.next();
        }
        env.gate_off();
        for _ in 0..20 {
            env.next();
        }
        assert!(env.is_idle());
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn voice_releases_after_hold() {
        let mut voice = Voice::new(Waveform::Sine, 0.5, SR);
        voice.note_on(110.0, Duration::from_millis(50));
        let peak = (0..50).map(|_| voice.next_sample().abs()).fold(0.0_f32, f32::max);
        assert!(peak > 0.0);
        assert!(peak <= 0.5);
        // 1s release at 1kHz: gone well within 2000 samples
        for _ in 0..2000 {
            voice.next_sample();
        }
        assert!(!voice.is_sounding());
    }

    #[test]
    fn zero_hold_still_releases() {
        let mut voice = Voice::new(Waveform::Sine, 0.5, SR);
        voice.note_on(220.0, Duration::ZERO);
        for _ in 0..2000 {
            voice.next_sample();
        }
        assert!(!voice.is_sounding());
    }

    #[test]
    fn silent_voice_outputs_zero() {
        let mut voice = Voice::new(Waveform::Square, 1.0, SR);
        assert!((0..10).all(|_| voice.next_sample() == 0.0));
    }
}
