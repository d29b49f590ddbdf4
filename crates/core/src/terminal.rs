//! Game-over detection.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::engine::resolve_move;
use crate::tile::TileIds;
use crate::types::{Direction, MAX_TILE_VALUE};

/// True while at least one direction can still produce a legal move.
///
/// A move exists iff some cell is empty or two orthogonal neighbours (right or
/// down of each cell) hold the same value below [`MAX_TILE_VALUE`].
pub fn has_any_move(board: &Board) -> bool {
    let rows = board.rows() as usize;
    let cols = board.cols() as usize;
    let cells = board.dense();

    for row in 0..rows {
        for col in 0..cols {
            let value = cells[row * cols + col];
            if value == 0 {
                return true;
            }
            if value == MAX_TILE_VALUE {
                continue;
            }
            if col + 1 < cols && cells[row * cols + col + 1] == value {
                return true;
            }
            if row + 1 < rows && cells[(row + 1) * cols + col] == value {
                return true;
            }
        }
    }
    false
}

/// Directions that would be accepted on `board`, in [`Direction::ALL`] order
pub fn legal_directions(board: &Board) -> ArrayVec<Direction, 4> {
    // Probe with a scratch id source; only merges draw ids.
    let mut scratch = TileIds::starting_at(board.max_id().map_or(0, |id| id.0 + 1));
    Direction::ALL
        .into_iter()
        .filter(|&dir| resolve_move(board, dir, &mut scratch).is_some())
        .collect()
}
