mod tmux_harness;

pub use tmux_harness::{tmux_available, PianolaSession};
