//! # pianola-types
//!
//! Shared type definitions for pianola.
//! This crate contains data structures used across pianola-core, pianola-audio
//! and the terminal front end.

pub mod action;
pub mod input;
pub mod music;
pub mod recording;

pub use action::{Action, DispatchResult, EngineFeedback, StatusEvent, StatusLevel};
pub use input::{KeyInput, PianoKey};
pub use music::{NoteDuration, PitchClass, PitchLabel, OCTAVE};
pub use recording::{RecordedEvent, RecordingBuffer};
