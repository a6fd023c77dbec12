pub mod frame;
pub mod held_keys;
pub mod input;
pub mod layout_helpers;
pub mod pane;
pub mod ratatui_impl;
pub mod render;
pub mod status_bar;
pub mod style;

pub use frame::Frame;
pub use held_keys::HeldKeys;
pub use pane::Pane;
pub use input::{AppEvent, InputEvent, InputSource, KeyCode, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use ratatui_impl::RatatuiBackend;
pub use render::{Rect, RenderBuf};
pub use style::{Color, Style};
