//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the sliding-tile merge puzzle. It has
//! **zero dependencies** on UI, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or injected rng) produces identical games
//! - **Pure**: The move engine is a function of the board, the direction and an
//!   explicit id source; it never mutates its input
//! - **Portable**: Drives the terminal front-end and the headless harness alike
//!
//! # Module Structure
//!
//! - [`tile`]: Tile records and the explicit [`TileIds`] identity source
//! - [`board`]: The authoritative tile set plus its dense value projection
//! - [`engine`]: Move resolution producing a [`MovePlan`]
//! - [`spawn`]: Random insertion of a new 2 or 4 after an accepted move
//! - [`terminal`]: Game-over detection
//! - [`game_state`]: A running game (score, lifecycle, restart)
//! - [`snapshot`]: Copyable view of a game for renderers and observers
//!
//! # Turn Order
//!
//! A turn runs to completion before the next one starts:
//!
//! 1. [`resolve_move`] computes a plan, or `None` when the direction changes nothing
//! 2. [`Board::apply`] applies the plan atomically
//! 3. [`spawn_tile`] inserts exactly one new tile
//! 4. [`has_any_move`] decides whether the game is over
//!
//! A rejected direction skips every later step.
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{resolve_move, Board, TileIds};
//! use tui_2048_types::Direction;
//!
//! let mut ids = TileIds::new();
//! let board = Board::from_values(&[[2, 2, 2, 0]], &mut ids).unwrap();
//!
//! let plan = resolve_move(&board, Direction::Left, &mut ids).unwrap();
//! assert_eq!(plan.score_delta, 4);
//!
//! // The freshly merged 4 does not absorb the trailing 2.
//! let next = board.apply(&plan);
//! assert_eq!(next.values(), vec![vec![4, 2, 0, 0]]);
//! ```

pub mod board;
pub mod engine;
pub mod game_state;
pub mod snapshot;
pub mod spawn;
pub mod terminal;
pub mod tile;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use engine::{resolve_move, MergeEvent, MovePlan, TileMove};
pub use game_state::{apply_direction, ActionOutcome, GameState, Turn};
pub use snapshot::{GameSnapshot, SnapshotView};
pub use spawn::{spawn, spawn_tile};
pub use terminal::{has_any_move, legal_directions};
pub use tile::{Tile, TileIds};
