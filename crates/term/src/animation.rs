//! Slide transitions derived from a [`MovePlan`].
//!
//! The core never carries "moving", "merged" or "new" flags. They are computed
//! here from the board before the move, the plan and the board after it.

use crate::core::{Board, MovePlan, Tile, Turn};
use crate::types::{Position, TileId};

/// Highlight applied to a tile in the settled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    /// Produced by a merge this turn
    Merged,
    /// Added by the spawn policy this turn
    Spawned,
}

/// A tile as drawn in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSprite {
    pub value: u32,
    pub position: Position,
    pub mark: Mark,
}

/// Sprites for a board at rest
pub fn board_sprites(board: &Board) -> Vec<TileSprite> {
    board
        .tiles()
        .iter()
        .map(|t| TileSprite {
            value: t.value,
            position: t.position,
            mark: Mark::None,
        })
        .collect()
}

/// Sprites for step `step` of a slide.
///
/// Every original tile has advanced `min(step, distance)` cells toward its
/// destination and still shows its pre-merge value. Step 0 is the board before
/// the move.
pub fn transition_sprites(prev: &Board, plan: &MovePlan, step: u32) -> Vec<TileSprite> {
    prev.tiles()
        .iter()
        .map(|tile| {
            let position = plan
                .moves
                .iter()
                .find(|m| m.id == tile.id)
                .map_or(tile.position, |m| advance(m.from, m.to, step.min(m.distance)));
            TileSprite {
                value: tile.value,
                position,
                mark: Mark::None,
            }
        })
        .collect()
}

/// Sprites for the board after the move and spawn, with highlights
pub fn settled_sprites(next: &Board, plan: &MovePlan, spawned: Option<&Tile>) -> Vec<TileSprite> {
    let spawned_id: Option<TileId> = spawned.map(|t| t.id);
    next.tiles()
        .iter()
        .map(|t| {
            let mark = if Some(t.id) == spawned_id {
                Mark::Spawned
            } else if plan.merges.iter().any(|m| m.id == t.id) {
                Mark::Merged
            } else {
                Mark::None
            };
            TileSprite {
                value: t.value,
                position: t.position,
                mark,
            }
        })
        .collect()
}

fn advance(from: Position, to: Position, cells: u32) -> Position {
    let step = |a: u8, b: u8| -> u8 {
        let cells = cells.min(a.abs_diff(b) as u32) as u8;
        if b >= a {
            a + cells
        } else {
            a - cells
        }
    };
    Position::new(step(from.row, to.row), step(from.col, to.col))
}

/// Everything needed to replay one accepted turn on screen
#[derive(Debug, Clone)]
pub struct Transition {
    prev: Board,
    next: Board,
    plan: MovePlan,
    spawned: Option<Tile>,
}

impl Transition {
    pub fn new(prev: Board, turn: Turn, next: Board) -> Self {
        Self {
            prev,
            next,
            plan: turn.plan,
            spawned: turn.spawned,
        }
    }

    /// Number of in-flight steps before the board settles
    pub fn steps(&self) -> u32 {
        self.plan.max_travel
    }

    /// Sprites for the current step; `None` or a finished step yields the settled frame.
    ///
    /// The settled frame is stable: it keeps its highlights for as long as the
    /// transition is held.
    pub fn sprites_at(&self, step: Option<u32>) -> Vec<TileSprite> {
        match step {
            Some(s) if s < self.steps() => transition_sprites(&self.prev, &self.plan, s),
            _ => settled_sprites(&self.next, &self.plan, self.spawned.as_ref()),
        }
    }
}
