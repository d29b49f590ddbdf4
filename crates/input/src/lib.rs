//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework beyond `crossterm` key
//! events. It maps keys into [`crate::types::GameAction`] and provides an
//! [`InputGate`] that serializes turns: slides arriving while the previous
//! move's transition is still on screen are dropped.

pub mod handler;
pub mod map;

pub use tui_2048_types as types;

pub use handler::InputGate;
pub use map::{handle_key_event, should_quit};
