//! Platform abstraction layer
//!
//! Translates browser/native events into game intents:
//! - Input key mapping
//!
//! Storage lives in `crate::highscore`.

pub mod input;

pub use input::{KeyAction, key_action};
