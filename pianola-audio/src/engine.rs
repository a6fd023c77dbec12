//! Engine implementations behind `NoteOutput`.
//!
//! `ToneEngine` owns a cpal output stream. Trigger commands travel to the
//! audio callback over a crossbeam channel; the callback drains it at the
//! start of every buffer and renders a single `Voice`.

use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use crossbeam_channel::{Receiver, Sender};

use pianola_types::PitchLabel;

use crate::commands::VoiceCmd;
use crate::devices;
use crate::voice::{Voice, Waveform};
use crate::NoteOutput;

/// User-tunable engine settings (filled from config by the front end).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub volume: f32,
    pub waveform: Waveform,
    /// None = system default
    pub output_device: Option<String>,
    pub tuning_a4: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            volume: 0.3,
            waveform: Waveform::Triangle,
            output_device: None,
            tuning_a4: 440.0,
        }
    }
}

struct ActiveOutput {
    cmd_tx: Sender<VoiceCmd>,
    /// Kept alive for as long as the engine is ready
    _stream: cpal::Stream,
}

/// cpal-backed engine with one synth voice.
pub struct ToneEngine {
    settings: EngineSettings,
    output: Option<ActiveOutput>,
}

impl ToneEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings, output: None }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn open_output(&self) -> Result<ActiveOutput, String> {
        let host = cpal::default_host();
        let device = devices::find_output_device(&host, self.settings.output_device.as_deref())
            .ok_or_else(|| "No audio output device found".to_string())?;

        let supported = device
            .default_output_config()
            .map_err(|e| format!("Failed to get output config: {}", e))?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        log::info!(
            target: "audio",
            "opening {} @ {}Hz, {} ch, {:?}",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let stream = match sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(&device, &config, cmd_rx),
            SampleFormat::I16 => self.build_stream::<i16>(&device, &config, cmd_rx),
            SampleFormat::U16 => self.build_stream::<u16>(&device, &config, cmd_rx),
            other => Err(format!("Unsupported sample format: {:?}", other)),
        }?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        Ok(ActiveOutput { cmd_tx, _stream: stream })
    }

    fn build_stream<T>(
        &self,
        device: &cpal::Device,
        config: &StreamConfig,
        cmd_rx: Receiver<VoiceCmd>,
    ) -> Result<cpal::Stream, String>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = config.channels.max(1) as usize;
        let mut voice = Voice::new(
            self.settings.waveform,
            self.settings.volume,
            config.sample_rate.0 as f32,
        );

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    while let Ok(cmd) = cmd_rx.try_recv() {
                        voice.apply(cmd);
                    }
                    for frame in data.chunks_mut(channels) {
                        let value = T::from_sample(voice.next_sample());
                        for out in frame.iter_mut() {
                            *out = value;
                        }
                    }
                },
                |err| {
                    log::error!(target: "audio", "output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| format!("Failed to build output stream: {}", e))
    }
}

impl NoteOutput for ToneEngine {
    fn unlock(&mut self) -> Result<(), String> {
        if self.output.is_some() {
            return Ok(());
        }
        self.output = Some(self.open_output()?);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.output.is_some()
    }

    fn trigger_note(&mut self, pitch: PitchLabel, duration: Duration) {
        let Some(output) = &self.output else {
            log::debug!(target: "audio", "trigger {} ignored: engine not ready", pitch);
            return;
        };
        let freq = pitch.frequency(self.settings.tuning_a4);
        if output.cmd_tx.send(VoiceCmd::NoteOn { freq, hold: duration }).is_err() {
            log::debug!(target: "audio", "trigger {} dropped: stream gone", pitch);
        }
    }

    fn dispose(&mut self) {
        // Dropping the stream stops the callback
        if self.output.take().is_some() {
            log::info!(target: "audio", "output released");
        }
    }
}

impl Drop for ToneEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Engine for machines without audio (and for `--no-audio`).
/// Unlocks unconditionally and only logs what it would have played.
#[derive(Debug, Default)]
pub struct SilentEngine {
    ready: bool,
    triggered: usize,
}

impl SilentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes triggered since unlock
    pub fn triggered(&self) -> usize {
        self.triggered
    }
}

impl NoteOutput for SilentEngine {
    fn unlock(&mut self) -> Result<(), String> {
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn trigger_note(&mut self, pitch: PitchLabel, duration: Duration) {
        if !self.ready {
            return;
        }
        self.triggered += 1;
        log::debug!(target: "audio", "silent trigger {} for {:?}", pitch, duration);
    }

    fn dispose(&mut self) {
        self.ready = false;
    }
}
