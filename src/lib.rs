//! Terminal 2048 (workspace facade crate).
//!
//! This package exposes `tui_2048::{core,adapter,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`. Configuration shared
//! by both binaries lives in [`config`].

pub mod config;

pub use tui_2048_adapter as adapter;
pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
