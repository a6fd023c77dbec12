use crate::ui::Rect;

/// Center a rect of `width x height` within the given `area`.
/// Clamps dimensions to available space with padding to prevent overflow.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let max_w = area.width.saturating_sub(2);
    let max_h = area.height.saturating_sub(2);
    let w = width.min(max_w);
    let h = height.min(max_h);

    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Area inside a one-cell border.
pub fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && row >= rect.y
        && column < rect.x.saturating_add(rect.width)
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_and_clamps() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(center_rect(area, 50, 10), Rect::new(25, 10, 50, 10));
        let small = Rect::new(0, 0, 20, 8);
        assert_eq!(center_rect(small, 50, 10), Rect::new(1, 1, 18, 6));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 1);
        assert!(contains(r, 2, 3));
        assert!(contains(r, 5, 3));
        assert!(!contains(r, 6, 3));
        assert!(!contains(r, 2, 4));
    }
}
