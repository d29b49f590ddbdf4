//! Spawn policy - one new tile after every accepted move
//!
//! A uniformly chosen empty cell receives a 2 (90%) or a 4 (10%). The rng is
//! injected so seeded games and tests are reproducible.

use rand::Rng;

use crate::board::Board;
use crate::tile::{Tile, TileIds};
use crate::types::{SPAWN_FOUR_PROBABILITY, SPAWN_FOUR_VALUE, SPAWN_VALUE};

/// Insert one random tile in place.
///
/// Returns the new tile, or `None` (drawing nothing from `rng` or `ids`) when
/// the board is full.
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R, ids: &mut TileIds) -> Option<Tile> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let position = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(SPAWN_FOUR_PROBABILITY) {
        SPAWN_FOUR_VALUE
    } else {
        SPAWN_VALUE
    };

    let tile = Tile::new(ids.next_id(), value, position);
    board.insert(tile);
    Some(tile)
}

/// Return `board` with one random tile added (unchanged when full)
pub fn spawn<R: Rng + ?Sized>(board: &Board, rng: &mut R, ids: &mut TileIds) -> Board {
    let mut next = board.clone();
    spawn_tile(&mut next, rng, ids);
    next
}
