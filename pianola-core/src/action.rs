//! Action types for the dispatch system, re-exported from pianola-types.

pub use pianola_types::{
    Action, DispatchResult, EngineFeedback, KeyInput, PianoKey, StatusEvent, StatusLevel,
};
