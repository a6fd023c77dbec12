use pianola_core::action::Action;
use pianola_core::state::{AppState, PitchClass, PitchLabel};

use crate::ui::layout_helpers::{center_rect, contains, inset};
use crate::ui::style::control_style;
use crate::ui::{Color, MouseButton, MouseEvent, MouseEventKind, Pane, Rect, RenderBuf, Style};

const PANEL_WIDTH: u16 = 58;
const PANEL_HEIGHT: u16 = 22;
const KEY_WIDTH: u16 = 6;
const KEY_HEIGHT: u16 = 3;
const KEY_GAP: u16 = 1;

const BANNER_TEXT: &str = "Press Space to start";
const EMPTY_RECORDING: &str = "No melody recorded yet";
const PLAY_LABEL: &str = "[ Play ]";
const RESET_LABEL: &str = "[ Reset ]";

const INSTRUCTIONS: [(&str, &str); 4] = [
    ("↑↓", "pick a note"),
    ("Space", "play it and record it"),
    ("Enter", "play back the melody"),
    ("Esc", "clear the recording"),
];

/// Screen positions of everything clickable, shared by render and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaneLayout {
    inner: Rect,
    banner: Rect,
    keys: [Rect; PitchClass::ALL.len()],
    play: Rect,
    reset: Rect,
}

impl PaneLayout {
    fn compute(area: Rect) -> Self {
        let panel = center_rect(inset(area), PANEL_WIDTH, PANEL_HEIGHT);
        let inner = inset(panel);
        let row = |offset: u16| inner.y + offset;

        let count = PitchClass::ALL.len() as u16;
        let keys_width = count * KEY_WIDTH + (count - 1) * KEY_GAP;
        let keys_x = inner.x + inner.width.saturating_sub(keys_width) / 2;
        let keys = std::array::from_fn(|i| {
            Rect::new(keys_x + i as u16 * (KEY_WIDTH + KEY_GAP), row(3), KEY_WIDTH, KEY_HEIGHT)
        });

        let play_w = PLAY_LABEL.len() as u16;
        let reset_w = RESET_LABEL.len() as u16;
        let buttons_x = inner.x + inner.width.saturating_sub(play_w + 3 + reset_w) / 2;

        Self {
            inner,
            banner: Rect::new(inner.x, row(0), inner.width, 1),
            keys,
            play: Rect::new(buttons_x, row(18), play_w, 1),
            reset: Rect::new(buttons_x + play_w + 3, row(18), reset_w, 1),
        }
    }

    fn key_at(&self, column: u16, row: u16) -> Option<usize> {
        self.keys.iter().position(|k| contains(*k, column, row))
    }
}

/// The keyboard piano screen: keys, instructions, recorded melody and the
/// Play/Reset controls.
pub struct PianoPane;

impl PianoPane {
    pub fn new() -> Self {
        Self
    }

    fn render_keys(&self, layout: &PaneLayout, buf: &mut RenderBuf, state: &AppState) {
        let selected = state.selection.index();
        // Most recently sounded note of a running pass
        let sounding = state
            .playback
            .pass()
            .and_then(|pass| pass.notes().get(pass.position().checked_sub(1)?).copied());

        for (i, (class, rect)) in PitchClass::ALL.iter().zip(layout.keys.iter()).enumerate() {
            let is_selected = i == selected;
            let bg = if is_selected { Color::KEY_SELECTED } else { Color::IVORY };
            let fg = if is_selected { Color::WHITE } else { Color::BLACK };
            let style = Style::new().fg(fg).bg(bg);
            buf.fill(*rect, ' ', style);

            let label = PitchLabel::at_default_octave(*class).to_string();
            let label_x = rect.x + (rect.width.saturating_sub(label.len() as u16)) / 2;
            let label_style = if is_selected { style.bold() } else { style };
            buf.draw_str(label_x, rect.y + rect.height - 1, &label, label_style);

            if sounding.is_some_and(|p| p.class == *class) {
                buf.set_cell(rect.x + rect.width / 2, rect.y, '♪', style.fg(Color::PINK));
            }
            if is_selected {
                buf.set_cell(rect.x + rect.width / 2, rect.y + rect.height, '▲', Style::new().fg(Color::KEY_SELECTED));
            }
        }
    }

    fn render_recording(&self, inner: Rect, y: u16, buf: &mut RenderBuf, state: &AppState) {
        let heading = format!("Recorded melody ({}):", state.recording.len());
        buf.draw_str(inner.x + 1, y, &heading, Style::new().fg(Color::WHITE).bold());

        if state.recording.is_empty() {
            buf.draw_str(inner.x + 3, y + 1, EMPTY_RECORDING, Style::new().fg(Color::DARK_GRAY));
            return;
        }

        let labels: Vec<String> = state.recording.iter().map(|e| e.pitch.to_string()).collect();
        for (offset, line) in recording_lines(&labels, inner.width.saturating_sub(4)).iter().enumerate() {
            buf.draw_str(inner.x + 3, y + 1 + offset as u16, line, Style::new().fg(Color::SKY_BLUE));
        }
    }
}

impl Default for PianoPane {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay the recorded labels out on at most two lines of `width` columns.
/// When they do not fit, the first line counts the hidden notes and the
/// second shows the most recent ones.
fn recording_lines(labels: &[String], width: u16) -> Vec<String> {
    const CELL: usize = 4; // "G4" plus two spaces
    let per_line = ((width as usize + 2) / CELL).max(1);

    if labels.len() <= per_line * 2 {
        return labels.chunks(per_line).map(|chunk| chunk.join("  ")).collect();
    }
    let shown = &labels[labels.len() - per_line..];
    vec![
        format!("… {} earlier notes", labels.len() - per_line),
        shown.join("  "),
    ]
}

impl Pane for PianoPane {
    fn render(&mut self, area: Rect, buf: &mut RenderBuf, state: &AppState) {
        let layout = PaneLayout::compute(area);
        let panel = Rect::new(
            layout.inner.x - 1,
            layout.inner.y - 1,
            layout.inner.width + 2,
            layout.inner.height + 2,
        );
        let border_style = Style::new().fg(Color::SKY_BLUE);
        let inner = buf.draw_block(panel, " Keyboard Piano ", border_style, border_style.bold());

        if !state.is_ready() {
            let x = inner.x + inner.width.saturating_sub(BANNER_TEXT.len() as u16) / 2;
            buf.draw_str(x, layout.banner.y, BANNER_TEXT, Style::new().fg(Color::BLACK).bg(Color::GOLD).bold());
        }

        let message: String = state.message.chars().take(inner.width.saturating_sub(2) as usize).collect();
        buf.draw_str(inner.x + 1, inner.y + 1, &message, Style::new().fg(Color::WHITE));

        self.render_keys(&layout, buf, state);

        let how_y = inner.y + 8;
        buf.draw_str(inner.x + 1, how_y, "How to play:", Style::new().fg(Color::WHITE).bold());
        for (i, (key, what)) in INSTRUCTIONS.iter().enumerate() {
            let y = how_y + 1 + i as u16;
            let key_text = format!("{:<7}", key);
            buf.draw_line(
                Rect::new(inner.x + 3, y, inner.width.saturating_sub(3), 1),
                &[
                    (key_text.as_str(), Style::new().fg(Color::GOLD)),
                    (*what, Style::new().fg(Color::GRAY)),
                ],
            );
        }

        self.render_recording(inner, inner.y + 14, buf, state);

        buf.draw_str(layout.play.x, layout.play.y, PLAY_LABEL, control_style(state.can_play(), Color::OK));
        buf.draw_str(layout.reset.x, layout.reset.y, RESET_LABEL, control_style(state.can_reset(), Color::ERROR));
    }

    fn handle_mouse(&mut self, event: &MouseEvent, area: Rect, state: &AppState) -> Action {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let layout = PaneLayout::compute(area);
        let (col, row) = (event.column, event.row);

        if let Some(index) = layout.key_at(col, row) {
            return Action::SelectNote(index);
        }
        if contains(layout.play, col, row) && state.can_play() {
            return Action::Play;
        }
        if contains(layout.reset, col, row) && state.can_reset() {
            return Action::Reset;
        }
        if contains(layout.banner, col, row) && !state.is_ready() {
            return Action::Activate;
        }
        Action::None
    }
}
