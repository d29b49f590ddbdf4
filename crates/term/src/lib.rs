//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a plain framebuffer that is then flushed to the terminal with crossterm,
//! without any widget or layout library.
//!
//! Goals:
//! - Keep `core` deterministic and free of presentation state
//! - Derive slide transitions from the engine's move plan
//! - Keep tiles readable (7x3 characters per tile by default)

pub mod animation;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use animation::{board_sprites, settled_sprites, transition_sprites, Mark, TileSprite, Transition};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{snapshot_sprites, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
