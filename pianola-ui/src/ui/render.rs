use ratatui::buffer::Buffer;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

pub use ratatui::layout::Rect;

use super::style::Style;

/// Thin drawing layer over a ratatui `Buffer` that speaks our `Style`.
pub struct RenderBuf<'a> {
    buf: &'a mut Buffer,
}

impl<'a> RenderBuf<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    /// Set a single character at (x, y) with the given style.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(ratatui::style::Style::from(style));
        }
    }

    /// Draw a string at (x, y) without wrapping. Characters beyond the buffer
    /// boundary are silently clipped.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let rat_style = ratatui::style::Style::from(style);
        for (i, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else { break };
            if let Some(cell) = self.buf.cell_mut((cx, y)) {
                cell.set_char(ch).set_style(rat_style);
            }
        }
    }

    /// Fill `area` with `ch`.
    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                self.set_cell(x, y, ch, style);
            }
        }
    }

    /// Draw a bordered block with a title. Returns the inner `Rect`.
    pub fn draw_block(
        &mut self,
        area: Rect,
        title: &str,
        border_style: Style,
        title_style: Style,
    ) -> Rect {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(ratatui::style::Style::from(border_style))
            .title_style(ratatui::style::Style::from(title_style));
        let inner = block.inner(area);
        block.render(area, self.buf);
        inner
    }

    /// Draw styled spans on a single line within the given area.
    pub fn draw_line(&mut self, area: Rect, spans: &[(&str, Style)]) {
        let rat_spans: Vec<Span> = spans
            .iter()
            .map(|(text, style)| Span::styled(*text, ratatui::style::Style::from(*style)))
            .collect();
        Paragraph::new(Line::from(rat_spans)).render(area, self.buf);
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_str_clips_at_edge() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        RenderBuf::new(&mut buf).draw_str(3, 0, "abcdef", Style::new());
        assert_eq!(buffer_text(&buf), "   ab\n");
    }

    #[test]
    fn block_returns_inner_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 5));
        let inner = RenderBuf::new(&mut buf).draw_block(
            Rect::new(0, 0, 10, 5),
            " t ",
            Style::new(),
            Style::new(),
        );
        assert_eq!(inner, Rect::new(1, 1, 8, 3));
    }
}
