//! Drives the `pianola` binary inside a detached tmux session.

use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

const WIDTH: u32 = 100;
const HEIGHT: u32 = 32;

/// tmux never reports key repeats, so the app falls back to timing. Presses
/// of the same key must be further apart than its initial repeat delay.
const KEY_GAP: Duration = Duration::from_millis(750);

const STARTUP_TIMEOUT: Duration = Duration::from_secs(3);

pub fn tmux_available() -> bool {
    tmux(&["-V"]).map(|o| o.status.success()).unwrap_or(false)
}

fn tmux(args: &[&str]) -> std::io::Result<std::process::Output> {
    // Drop TMUX so this also works from inside a tmux session
    Command::new("tmux").args(args).env_remove("TMUX").output()
}

/// One running pianola, silent, in an 100x32 terminal.
pub struct PianolaSession {
    name: String,
}

impl PianolaSession {
    /// Start the app and wait for the activation banner.
    pub fn launch(test_name: &str) -> Result<Self, String> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let session = Self { name: format!("pianola-{}-{}", test_name, stamp) };

        // The tmux server spawns the child with its own environment
        let command = format!("PIANOLA_NO_AUDIO=1 {} --no-audio", env!("CARGO_BIN_EXE_pianola"));
        let (width, height) = (WIDTH.to_string(), HEIGHT.to_string());
        let output = tmux(&["new-session", "-d", "-s", &session.name, "-x", &width, "-y", &height, &command])
            .map_err(|e| format!("Failed to start tmux: {}", e))?;
        if !output.status.success() {
            return Err("tmux new-session failed".to_string());
        }

        session.wait_for_text("Press Space to start", STARTUP_TIMEOUT)?;
        Ok(session)
    }

    /// Launch, then press Space once so sound is on.
    pub fn start_activated(test_name: &str) -> Result<Self, String> {
        let session = Self::launch(test_name)?;
        session.press("Space")?;
        session.wait_for_text("Sound is on", STARTUP_TIMEOUT)?;
        Ok(session)
    }

    /// Send one key (tmux key name) as a fresh press.
    pub fn press(&self, key: &str) -> Result<(), String> {
        let output = tmux(&["send-keys", "-t", &self.name, key])
            .map_err(|e| format!("Failed to send {}: {}", key, e))?;
        if !output.status.success() {
            return Err(format!("tmux send-keys failed for key: {}", key));
        }
        thread::sleep(KEY_GAP);
        Ok(())
    }

    pub fn screen(&self) -> Result<String, String> {
        let output = tmux(&["capture-pane", "-t", &self.name, "-p"])
            .map_err(|e| format!("Failed to capture screen: {}", e))?;
        if !output.status.success() {
            return Err("tmux capture-pane failed".to_string());
        }
        String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8 in screen capture: {}", e))
    }

    /// Poll the screen until `text` shows up or `timeout` passes.
    pub fn wait_for_text(&self, text: &str, timeout: Duration) -> Result<(), String> {
        let start = Instant::now();
        loop {
            let screen = self.screen()?;
            if screen.contains(text) {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(format!("Expected screen to contain: '{}'\nActual screen:\n{}", text, screen));
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    /// Number of recorded notes, read from the "Recorded melody (N):" heading.
    pub fn recorded_count(&self) -> Result<usize, String> {
        let screen = self.screen()?;
        if screen.contains("No melody recorded yet") {
            return Ok(0);
        }
        let heading = "Recorded melody (";
        screen
            .find(heading)
            .map(|at| &screen[at + heading.len()..])
            .and_then(|rest| rest.split(')').next())
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| format!("No recording heading on screen:\n{}", screen))
    }

    /// Press Enter and wait for the pass to finish. Each note takes 300 ms.
    pub fn play_through(&self, notes: usize) -> Result<(), String> {
        self.press("Enter")?;
        let timeout = Duration::from_millis(300 * notes as u64) + STARTUP_TIMEOUT;
        self.wait_for_text("Playback complete", timeout)
    }

    pub fn is_running(&self) -> bool {
        tmux(&["has-session", "-t", &self.name])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn wait_for_exit(&self, timeout: Duration) -> Result<(), String> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if !self.is_running() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(100));
        }
        Err("Timeout waiting for pianola to exit".to_string())
    }
}

impl Drop for PianolaSession {
    fn drop(&mut self) {
        let _ = tmux(&["kill-session", "-t", &self.name]);
    }
}
