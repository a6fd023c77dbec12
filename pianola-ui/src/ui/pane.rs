use pianola_core::action::Action;
use pianola_core::state::AppState;

use super::{MouseEvent, Rect, RenderBuf};

/// Trait for UI panes (screens/views).
pub trait Pane {
    /// Render the pane. `area` is the full terminal area.
    fn render(&mut self, area: Rect, buf: &mut RenderBuf, state: &AppState);

    /// Handle mouse input. Area is the full terminal area (same as render receives).
    fn handle_mouse(&mut self, _event: &MouseEvent, _area: Rect, _state: &AppState) -> Action {
        Action::None
    }
}
