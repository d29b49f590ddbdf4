//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (move engine, terminal rendering, headless harness).
//!
//! # Board Dimensions
//!
//! The classic game is played on a 4x4 grid. The engine itself is
//! dimension-agnostic: any `rows x cols` grid up to [`MAX_BOARD_SIZE`] on a side
//! is accepted, including single lines such as 1x4.
//!
//! Coordinates are `(row, col)` with `(0, 0)` at the top-left corner.
//!
//! # Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STARTING_TILES` | 2 | Tiles placed on a fresh board |
//! | `SPAWN_VALUE` | 2 | Common spawn value |
//! | `SPAWN_FOUR_VALUE` | 4 | Rare spawn value |
//! | `SPAWN_FOUR_PROBABILITY` | 0.1 | Chance a spawn is a 4 |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position};
//!
//! let dir = Direction::from_str("LEFT").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!(dir.is_horizontal());
//!
//! let action = GameAction::from_str("up").unwrap();
//! assert_eq!(action, GameAction::Slide(Direction::Up));
//!
//! let pos = Position::new(1, 2);
//! assert_eq!(pos.distance(Position::new(1, 0)), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Side length of the default square board
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Largest accepted side length (rows or columns)
pub const MAX_BOARD_SIZE: u8 = 8;

/// Smallest square board the front-ends will start a game on
pub const MIN_PLAYABLE_SIZE: u8 = 2;

/// Number of tiles spawned onto a fresh board
pub const STARTING_TILES: usize = 2;

/// Value of a regular spawn
pub const SPAWN_VALUE: u32 = 2;

/// Value of a rare spawn
pub const SPAWN_FOUR_VALUE: u32 = 4;

/// Probability that a spawn is [`SPAWN_FOUR_VALUE`] instead of [`SPAWN_VALUE`]
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

/// Creating a tile of this value marks the episode as won (play continues)
pub const WIN_VALUE: u32 = 2048;

/// Largest tile value a `u32` can hold; two of these never merge
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Front-end tick in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default duration of one transition step (one cell of travel)
pub const DEFAULT_STEP_MS: u32 = 40;

/// Slide direction
///
/// The direction names the wall tiles travel toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "left" | "l", "right" | "r",
    /// "up" | "u", "down" | "d".
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("d"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Left and right slide along rows
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles travel toward index 0 (left or up)
    pub fn toward_origin(&self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Grid coordinate, `(0, 0)` is the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`
    pub fn distance(&self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) as u32) + (self.col.abs_diff(other.col) as u32)
    }
}

/// Unique tile identity
///
/// Assigned once when a tile is spawned or produced by a merge, never reused.
/// Front-ends key animations on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

/// Game actions that can be applied to a running game
///
/// Used by both keyboard input and the headless harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward a wall
    Slide(Direction),
    /// Throw the current board away and start a new episode
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Any direction name parses as a slide; "restart" parses as [`GameAction::Restart`].
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("restart") {
            return Some(GameAction::Restart);
        }
        Direction::from_str(s).map(GameAction::Slide)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Slide(dir) => dir.as_str(),
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_defaults() {
        assert_eq!(STARTING_TILES, 2);
        assert_eq!(SPAWN_VALUE, 2);
        assert_eq!(SPAWN_FOUR_VALUE, 4);
        assert!((SPAWN_FOUR_PROBABILITY - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn direction_axes() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());

        assert!(Direction::Left.toward_origin());
        assert!(Direction::Up.toward_origin());
        assert!(!Direction::Right.toward_origin());
        assert!(!Direction::Down.toward_origin());
    }

    #[test]
    fn direction_string_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn action_parsing() {
        assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
        assert_eq!(
            GameAction::from_str("left"),
            Some(GameAction::Slide(Direction::Left))
        );
        assert_eq!(GameAction::from_str("hold"), None);
        assert_eq!(GameAction::Slide(Direction::Down).as_str(), "down");
    }

    #[test]
    fn position_distance_is_manhattan() {
        let a = Position::new(0, 3);
        let b = Position::new(2, 1);
        assert_eq!(a.distance(b), 4);
        assert_eq!(b.distance(a), 4);
        assert_eq!(a.distance(a), 0);
    }
}
