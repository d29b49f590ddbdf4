//! Adapter module - headless control over line-delimited JSON
//!
//! This crate lets bots, scripts and test harnesses play the game without a
//! terminal. Commands arrive one JSON object per line on stdin; every command is
//! answered by exactly one JSON line on stdout.
//!
//! # Message Types
//!
//! ## Client → Harness
//!
//! - **new_game**: Start a fresh game, optionally with `seed` and `size`
//! - **move**: Slide in `direction` (`up`, `down`, `left`, `right`)
//! - **observe**: Report the current state without changing it
//! - **restart**: Start the next episode on a board of the same size
//!
//! ## Harness → Client
//!
//! - **observation**: Grid, score, best tile, moves and flags
//! - **turn**: The move plan, the spawned tile and the resulting observation
//! - **rejected**: The direction changed nothing; the state is unchanged
//! - **error**: Unparsable line, unknown direction or bad size
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Harness: {"type":"new_game","seed":7,"size":4}
//! Harness -> Client: {"type":"observation","grid":[[0,2,0,0],...],"score":0,"best":2,...}
//! Client -> Harness: {"type":"move","direction":"left"}
//! Harness -> Client: {"type":"turn","plan":{...},"spawned":{...},"observation":{...}}
//! Client -> Harness: {"type":"move","direction":"sideways"}
//! Harness -> Client: {"type":"error","code":"invalid_direction","message":"..."}
//! ```
//!
//! # Testing
//!
//! ```bash
//! echo '{"type":"observe"}' | cargo run --bin tui-2048-headless
//! ```

pub mod protocol;
pub mod session;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use protocol::{ClientMessage, ErrorCode, ServerMessage};
pub use session::{Session, SessionConfig};
