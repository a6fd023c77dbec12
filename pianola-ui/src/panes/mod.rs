mod piano_pane;

pub use piano_pane::PianoPane;
