//! # pianola-core
//!
//! Session logic for the pianola keyboard piano: state, key routing, action
//! dispatch, the playback sequencer and configuration. Independent of the
//! terminal front end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use pianola_core::action::{Action, KeyInput, PianoKey};
//! use pianola_core::config::Config;
//! use pianola_core::dispatch::{apply_side_effects, dispatch_action};
//! use pianola_core::router::route;
//! use pianola_core::state::AppState;
//!
//! let config = Config::load();
//! let mut state = AppState::new_with_defaults(config.defaults());
//! let mut engine = pianola_audio::SilentEngine::new();
//!
//! let action = route(&KeyInput::press(PianoKey::Space), &state);
//! let mut effects = Vec::new();
//! let result = dispatch_action(&action, &mut state, &mut effects, Instant::now());
//! for feedback in apply_side_effects(&effects, &mut engine) {
//!     dispatch_action(&feedback, &mut state, &mut Vec::new(), Instant::now());
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`state`]: `AppState`: selection, recording, engine lifecycle, playback
//! - [`router`]: `route()`: key press to `Action`
//! - [`dispatch`]: `dispatch_action()`, the single entry point for state
//!   mutation, plus `AudioSideEffect` and the playback sequencer
//! - [`config`]: TOML configuration (embedded defaults + user override)

pub mod action;
pub mod config;
pub mod dispatch;
pub mod router;
pub mod state;
