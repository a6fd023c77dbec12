use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::state::SessionDefaults;
use pianola_types::PitchClass;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    audio: AudioConfig,
    #[serde(default)]
    input: InputConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    start_note: Option<String>,
}

#[derive(Deserialize, Default)]
struct AudioConfig {
    volume: Option<f32>,
    waveform: Option<String>,
    tuning_a4: Option<f32>,
    output_device: Option<String>,
}

#[derive(Deserialize, Default)]
struct InputConfig {
    repeat_window_ms: Option<u64>,
    initial_repeat_delay_ms: Option<u64>,
}

pub struct Config {
    defaults: DefaultsConfig,
    audio: AudioConfig,
    input: InputConfig,
}

impl Config {
    /// Embedded defaults merged with `~/.config/pianola/config.toml`.
    pub fn load() -> Self {
        Self::load_with(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `user_path`, if it exists.
    pub fn load_with(user_path: Option<&Path>) -> Self {
        let mut base: ConfigFile = match toml::from_str(DEFAULT_CONFIG) {
            Ok(c) => c,
            Err(e) => {
                log::error!(target: "config", "embedded config.toml is invalid: {}", e);
                ConfigFile::default()
            }
        };

        if let Some(path) = user_path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_audio(&mut base.audio, user.audio);
                            merge_input(&mut base.input, user.input);
                            log::info!(target: "config", "loaded {}", path.display());
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            audio: base.audio,
            input: base.input,
        }
    }

    pub fn defaults(&self) -> SessionDefaults {
        let fallback = SessionDefaults::default();
        SessionDefaults {
            start_note: self
                .defaults
                .start_note
                .as_deref()
                .and_then(PitchClass::from_name)
                .unwrap_or(fallback.start_note),
        }
    }

    /// Output volume, clamped to 0.0..=1.0
    pub fn volume(&self) -> f32 {
        self.audio
            .volume
            .filter(|v| v.is_finite())
            .unwrap_or(0.3)
            .clamp(0.0, 1.0)
    }

    /// Raw waveform name; the audio crate parses it.
    pub fn waveform(&self) -> Option<&str> {
        self.audio.waveform.as_deref()
    }

    pub fn tuning_a4(&self) -> f32 {
        self.audio
            .tuning_a4
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or(440.0)
    }

    pub fn output_device(&self) -> Option<&str> {
        self.audio.output_device.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Window for software repeat detection (clamped to 10..=2000 ms).
    pub fn repeat_window(&self) -> Duration {
        Duration::from_millis(self.input.repeat_window_ms.unwrap_or(150).clamp(10, 2000))
    }

    /// Pause the OS leaves between a press and its first auto-repeat
    /// (clamped to 10..=2000 ms).
    pub fn initial_repeat_delay(&self) -> Duration {
        Duration::from_millis(self.input.initial_repeat_delay_ms.unwrap_or(600).clamp(10, 2000))
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pianola").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.start_note.is_some() {
        base.start_note = user.start_note;
    }
}

fn merge_audio(base: &mut AudioConfig, user: AudioConfig) {
    if user.volume.is_some() {
        base.volume = user.volume;
    }
    if user.waveform.is_some() {
        base.waveform = user.waveform;
    }
    if user.tuning_a4.is_some() {
        base.tuning_a4 = user.tuning_a4;
    }
    if user.output_device.is_some() {
        base.output_device = user.output_device;
    }
}

fn merge_input(base: &mut InputConfig, user: InputConfig) {
    if user.repeat_window_ms.is_some() {
        base.repeat_window_ms = user.repeat_window_ms;
    }
    if user.initial_repeat_delay_ms.is_some() {
        base.initial_repeat_delay_ms = user.initial_repeat_delay_ms;
    }
}
