use pianola_audio::{EngineSettings, NoteOutput, SilentEngine, ToneEngine, Waveform};
use pianola_core::config::Config;

/// Environment switch for running without an audio device (tests, CI, ssh).
pub const NO_AUDIO_ENV: &str = "PIANOLA_NO_AUDIO";

/// Build engine settings from configuration. Unknown waveform names fall
/// back to the default with a warning.
pub fn engine_settings(config: &Config) -> EngineSettings {
    let defaults = EngineSettings::default();
    let waveform = match config.waveform() {
        Some(name) => Waveform::from_name(name).unwrap_or_else(|| {
            log::warn!(target: "config", "unknown waveform '{}', using {:?}", name, defaults.waveform);
            defaults.waveform
        }),
        None => defaults.waveform,
    };
    EngineSettings {
        volume: config.volume(),
        waveform,
        output_device: config.output_device().map(str::to_string),
        tuning_a4: config.tuning_a4(),
    }
}

/// Choose the note output. The device itself is only opened later, on the
/// activation gesture.
pub fn create_output(config: &Config, no_audio: bool) -> Box<dyn NoteOutput> {
    if no_audio || std::env::var(NO_AUDIO_ENV).is_ok() {
        log::info!(target: "audio", "audio disabled, using silent engine");
        return Box::new(SilentEngine::new());
    }
    let settings = engine_settings(config);
    log::info!(
        target: "audio",
        "tone engine: {:?} volume {:.2} A4={}Hz device={}",
        settings.waveform,
        settings.volume,
        settings.tuning_a4,
        settings.output_device.as_deref().unwrap_or("default")
    );
    Box::new(ToneEngine::new(settings))
}

/// Header label describing where sound goes.
pub fn device_label(config: &Config, no_audio: bool) -> String {
    if no_audio || std::env::var(NO_AUDIO_ENV).is_ok() {
        "silent".to_string()
    } else {
        config.output_device().unwrap_or("default output").to_string()
    }
}

/// `--list-devices`: print output devices to stdout. `*` marks the default.
pub fn print_output_devices() {
    let devices = pianola_audio::devices::list_output_devices();
    if devices.is_empty() {
        println!("No audio output devices found");
        return;
    }
    for device in devices {
        let marker = if device.is_default_output { "*" } else { " " };
        println!("{} {}", marker, device.describe());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_from(toml: &str) -> Config {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        Config::load_with(Some(file.path()))
    }

    #[test]
    fn settings_follow_config() {
        let config = config_from("[audio]\nwaveform = \"square\"\nvolume = 0.5\n");
        let settings = engine_settings(&config);
        assert_eq!(settings.waveform, Waveform::Square);
        assert!((settings.volume - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unknown_waveform_falls_back() {
        let config = config_from("[audio]\nwaveform = \"kazoo\"\n");
        assert_eq!(engine_settings(&config).waveform, EngineSettings::default().waveform);
    }

    #[test]
    fn no_audio_gives_silent_output() {
        let mut output = create_output(&Config::load_with(None), true);
        assert!(output.unlock().is_ok());
        assert!(output.is_ready());
        assert_eq!(device_label(&Config::load_with(None), true), "silent");
    }
}
