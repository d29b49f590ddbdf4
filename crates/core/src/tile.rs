//! Tile records and identity generation.

use serde::Serialize;

use crate::types::{Position, TileId};

/// A single numbered tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
}

impl Tile {
    pub fn new(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
        }
    }
}

/// Monotonic tile id source.
///
/// Threaded explicitly through the engine and the spawn policy so both stay
/// pure functions of their inputs. Ids are never handed out twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering at `next` (used when resuming from an existing board)
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Hand out a fresh id
    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`TileIds::next_id`] will return
    pub fn peek(&self) -> TileId {
        TileId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let mut ids = TileIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!((a, b, c), (TileId(0), TileId(1), TileId(2)));
        assert_eq!(ids.peek(), TileId(3));
    }

    #[test]
    fn starting_at_resumes_numbering() {
        let mut ids = TileIds::starting_at(41);
        assert_eq!(ids.next_id(), TileId(41));
        assert_eq!(ids.next_id(), TileId(42));
    }
}
