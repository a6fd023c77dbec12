use pianola_core::state::AppState;

use super::status_bar::{StatusBar, StatusLevel};
use super::{Color, Rect, RenderBuf, Style};

/// Outer frame around the piano pane: border, header, engine and playback
/// indicators, and the status bar on the bottom border.
pub struct Frame {
    /// Output device description for the header, if any
    pub device_label: Option<String>,
    /// Status bar for transient user notifications
    pub status_bar: StatusBar,
}

impl Frame {
    pub const MIN_WIDTH: u16 = 62;
    pub const MIN_HEIGHT: u16 = 26;

    pub fn new() -> Self {
        Self {
            device_label: None,
            status_bar: StatusBar::new(),
        }
    }

    /// Returns true if the terminal area is large enough for normal rendering.
    pub fn is_size_ok(area: Rect) -> bool {
        area.width >= Self::MIN_WIDTH && area.height >= Self::MIN_HEIGHT
    }

    pub fn render_buf(&self, area: Rect, buf: &mut RenderBuf, state: &AppState) {
        if !Self::is_size_ok(area) {
            let msg = format!(
                "{}x{} required, got {}x{}",
                Self::MIN_WIDTH, Self::MIN_HEIGHT, area.width, area.height
            );
            let x = area.x + area.width.saturating_sub(msg.len() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.draw_str(x, y, &msg, Style::new().fg(Color::ERROR));
            return;
        }

        let border_style = Style::new().fg(Color::GRAY);
        buf.draw_block(area, "", border_style, border_style);

        let header = " PIANOLA ";
        buf.draw_str(area.x + 2, area.y, header, Style::new().fg(Color::CYAN).bold());

        // Right-aligned indicators on the top border, drawn right to left
        let mut cursor = area.x + area.width.saturating_sub(2);
        let (audio_text, audio_color) = if state.is_ready() {
            (" ● AUDIO ", Color::OK)
        } else {
            (" ○ AUDIO ", Color::DARK_GRAY)
        };
        cursor = cursor.saturating_sub(audio_text.chars().count() as u16);
        buf.draw_str(cursor, area.y, audio_text, Style::new().fg(audio_color));

        if state.is_playing() {
            let play_text = " ▶ PLAY ";
            cursor = cursor.saturating_sub(play_text.chars().count() as u16);
            buf.draw_str(cursor, area.y, play_text, Style::new().fg(Color::GOLD).bold());
        }

        if let Some(device) = &self.device_label {
            let text = format!(" {} ", device);
            let width = text.chars().count() as u16;
            let header_end = area.x + 2 + header.len() as u16;
            if cursor > header_end + width {
                cursor -= width;
                buf.draw_str(cursor, area.y, &text, Style::new().fg(Color::GRAY));
            }
        }

        if let Some(msg) = self.status_bar.current() {
            let bottom_y = area.y + area.height.saturating_sub(1);
            let color = match msg.level {
                StatusLevel::Info => Color::OK,
                StatusLevel::Warning => Color::WARN,
                StatusLevel::Error => Color::ERROR,
            };
            let text = format!(" {} ", msg.text);
            let max_width = area.width.saturating_sub(4) as usize;
            let display: String = text.chars().take(max_width).collect();
            let x = area.x + area.width.saturating_sub(display.chars().count() as u16) / 2;
            buf.draw_str(x, bottom_y, &display, Style::new().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::buffer_text;
    use pianola_core::state::EngineLifecycle;
    use ratatui::buffer::Buffer;

    fn render(frame: &Frame, state: &AppState, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        frame.render_buf(area, &mut RenderBuf::new(&mut buf), state);
        buffer_text(&buf)
    }

    #[test]
    fn too_small_shows_notice() {
        let text = render(&Frame::new(), &AppState::default(), Rect::new(0, 0, 30, 10));
        assert!(text.contains("required"));
    }

    #[test]
    fn indicators_follow_state() {
        let mut state = AppState::default();
        let area = Rect::new(0, 0, 80, 30);
        let text = render(&Frame::new(), &state, area);
        assert!(text.contains("PIANOLA"));
        assert!(text.contains("○ AUDIO"));

        state.lifecycle = EngineLifecycle::Ready;
        let text = render(&Frame::new(), &state, area);
        assert!(text.contains("● AUDIO"));
        assert!(!text.contains("PLAY"));
    }

    #[test]
    fn status_message_on_bottom_border() {
        let mut frame = Frame::new();
        frame.status_bar.push("Audio unavailable: busy", StatusLevel::Error);
        let text = render(&frame, &AppState::default(), Rect::new(0, 0, 80, 30));
        let last_line = text.lines().last().unwrap();
        assert!(last_line.contains("Audio unavailable: busy"));
    }
}
