use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

/// An output device discovered on the system
#[derive(Debug, Clone)]
pub struct AudioDevice {
    pub name: String,
    pub output_channels: Option<u16>,
    pub sample_rate: Option<u32>,
    pub is_default_output: bool,
}

impl AudioDevice {
    /// One-line description, e.g. "Built-in Output (2 ch, 48000 Hz)"
    pub fn describe(&self) -> String {
        let mut details = Vec::new();
        if let Some(ch) = self.output_channels {
            details.push(format!("{} ch", ch));
        }
        if let Some(sr) = self.sample_rate {
            details.push(format!("{} Hz", sr));
        }
        if details.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, details.join(", "))
        }
    }
}

/// Output devices of the default host
pub fn list_output_devices() -> Vec<AudioDevice> {
    enumerate_output_devices(&cpal::default_host())
}

/// Enumerate output devices on the given host
pub fn enumerate_output_devices(host: &Host) -> Vec<AudioDevice> {
    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    let devices = match host.output_devices() {
        Ok(d) => d,
        Err(e) => {
            log::warn!(target: "audio", "could not enumerate output devices: {}", e);
            return Vec::new();
        }
    };

    devices
        .filter_map(|device| {
            let name = device.name().ok()?;
            let config = device.default_output_config().ok();
            Some(AudioDevice {
                is_default_output: default_name.as_deref() == Some(name.as_str()),
                output_channels: config.as_ref().map(|c| c.channels()),
                sample_rate: config.as_ref().map(|c| c.sample_rate().0),
                name,
            })
        })
        .collect()
}

/// Resolve a configured device name. `None`, or a name that no longer
/// exists, falls back to the host default.
pub fn find_output_device(host: &Host, name: Option<&str>) -> Option<Device> {
    if let Some(wanted) = name {
        let found = host.output_devices().ok().and_then(|mut devices| {
            devices.find(|d| d.name().map(|n| names_match(&n, wanted)).unwrap_or(false))
        });
        if found.is_some() {
            return found;
        }
        log::warn!(target: "audio", "output device {:?} not found, using default", wanted);
    }
    host.default_output_device()
}

fn names_match(device_name: &str, wanted: &str) -> bool {
    device_name.trim().eq_ignore_ascii_case(wanted.trim())
}
