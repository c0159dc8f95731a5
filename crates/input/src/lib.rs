//! Terminal input.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s. It knows
//! nothing about timing; every press becomes at most one action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
