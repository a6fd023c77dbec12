//! Rendering: FPS throttle and frame rendering.

use std::time::{Duration, Instant};

use super::AppRuntime;
use crate::ui::{Frame, RatatuiBackend};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

impl AppRuntime {
    /// Render at ~60fps if needed.
    pub(crate) fn maybe_render(&mut self, backend: &mut RatatuiBackend) -> std::io::Result<()> {
        let now = Instant::now();
        if now.duration_since(self.last_render_time) < FRAME_INTERVAL {
            return Ok(());
        }

        // Keep redrawing while a status message is up, plus once after it
        // expires so it disappears
        let status_visible = self.app_frame.status_bar.current().is_some();
        if status_visible || self.status_shown {
            self.render_needed = true;
        }
        self.status_shown = status_visible;

        if !self.render_needed {
            return Ok(());
        }
        self.last_render_time = now;

        let app_frame = &self.app_frame;
        let pane = &mut self.pane;
        let state = &self.state;
        let area = backend.draw(|area, buf| {
            app_frame.render_buf(area, buf, state);
            if Frame::is_size_ok(area) {
                pane.render(area, buf, state);
            }
        })?;

        self.last_area = area;
        self.render_needed = false;
        Ok(())
    }
}
