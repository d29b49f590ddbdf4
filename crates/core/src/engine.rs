//! Move engine - resolves one slide into a [`MovePlan`]
//!
//! Each row (horizontal slides) or column (vertical slides) is resolved
//! independently:
//!
//! 1. Tiles of the line are ordered by distance from the target wall, nearest first.
//! 2. A single greedy pass groups them. A tile joins the open group only if the
//!    group has not merged yet and holds the same value; otherwise it opens a new
//!    group. A merged group never absorbs a third tile, so `[2, 2, 2]` slides to
//!    `[4, 2]` and never to `[8]`. Tiles at `MAX_TILE_VALUE` never merge.
//! 3. The k-th group lands in the k-th slot counted from the wall.
//!
//! Merge precedence comes only from the wall ordering; tile ids never matter.
//! The engine does not mutate the board. The caller applies the plan with
//! [`Board::apply`](crate::Board::apply).

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Board;
use crate::tile::{Tile, TileIds};
use crate::types::{Direction, Position, TileId, MAX_TILE_VALUE};

/// Where one original tile ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileMove {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
    /// Cells travelled along the slide axis
    pub distance: u32,
}

/// Two equal tiles collapsing into a successor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeEvent {
    /// Fresh identity of the successor tile
    pub id: TileId,
    pub value: u32,
    pub position: Position,
    /// The tile nearer the wall first
    pub sources: [TileId; 2],
}

/// The outcome of one accepted slide.
///
/// Consumed once by the caller, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovePlan {
    pub direction: Direction,
    /// Sum of the values of every tile produced by a merge
    pub score_delta: u64,
    /// One entry per original tile, grouped by line in wall order
    pub moves: Vec<TileMove>,
    /// Merges in processing order
    pub merges: Vec<MergeEvent>,
    /// Longest travel of any tile, at least 1 (animation step count)
    pub max_travel: u32,
}

impl MovePlan {
    /// Final position of an original tile
    pub fn destination(&self, id: TileId) -> Option<Position> {
        self.moves.iter().find(|m| m.id == id).map(|m| m.to)
    }

    /// True when `id` is consumed by a merge in this plan
    pub fn is_merged_away(&self, id: TileId) -> bool {
        self.merges.iter().any(|m| m.sources.contains(&id))
    }
}

/// A run of tiles that share one destination slot
#[derive(Debug)]
struct Group {
    value: u32,
    merged: bool,
    members: ArrayVec<Tile, 2>,
}

/// Resolve a slide of every tile on `board` toward `direction`.
///
/// Returns `None` when no tile would change position and nothing merges. In
/// that case `ids` is left untouched: fresh ids are only drawn for merges.
pub fn resolve_move(board: &Board, direction: Direction, ids: &mut TileIds) -> Option<MovePlan> {
    debug_assert!(
        board.validate().is_ok(),
        "resolve_move called with an invalid board: {:?}",
        board.validate()
    );

    let horizontal = direction.is_horizontal();
    let (line_count, line_len) = if horizontal {
        (board.rows() as usize, board.cols() as usize)
    } else {
        (board.cols() as usize, board.rows() as usize)
    };

    let mut lines: Vec<Vec<Tile>> = vec![Vec::new(); line_count];
    for tile in board.tiles() {
        let line = if horizontal {
            tile.position.row
        } else {
            tile.position.col
        };
        lines[line as usize].push(*tile);
    }

    let mut plan = MovePlan {
        direction,
        score_delta: 0,
        moves: Vec::with_capacity(board.len()),
        merges: Vec::new(),
        max_travel: 0,
    };

    for (line, mut tiles) in lines.into_iter().enumerate() {
        order_toward_wall(&mut tiles, direction);
        let (groups, gained) = group_line(tiles);
        plan.score_delta += gained;

        for (k, group) in groups.iter().enumerate() {
            let slot = if direction.toward_origin() {
                k
            } else {
                line_len - 1 - k
            };
            let to = if horizontal {
                Position::new(line as u8, slot as u8)
            } else {
                Position::new(slot as u8, line as u8)
            };

            for tile in &group.members {
                plan.moves.push(TileMove {
                    id: tile.id,
                    from: tile.position,
                    to,
                    distance: tile.position.distance(to),
                });
            }

            if group.merged {
                plan.merges.push(MergeEvent {
                    id: ids.next_id(),
                    value: group.value,
                    position: to,
                    sources: [group.members[0].id, group.members[1].id],
                });
            }
        }
    }

    let moved = plan.moves.iter().any(|m| m.from != m.to) || !plan.merges.is_empty();
    if !moved {
        return None;
    }

    plan.max_travel = plan
        .moves
        .iter()
        .map(|m| m.distance)
        .max()
        .unwrap_or(0)
        .max(1);
    Some(plan)
}

/// Sort one line so the tile nearest the target wall comes first
fn order_toward_wall(tiles: &mut [Tile], direction: Direction) {
    let along = |t: &Tile| {
        if direction.is_horizontal() {
            t.position.col
        } else {
            t.position.row
        }
    };
    if direction.toward_origin() {
        tiles.sort_by_key(along);
    } else {
        tiles.sort_by_key(|t| std::cmp::Reverse(along(t)));
    }
}

/// Greedy single-pass grouping of an ordered line.
///
/// Returns the groups in wall order and the score gained from merges.
fn group_line(tiles: Vec<Tile>) -> (Vec<Group>, u64) {
    let mut groups: Vec<Group> = Vec::with_capacity(tiles.len());
    let mut gained = 0u64;

    for tile in tiles {
        match groups.last_mut() {
            Some(open) if !open.merged && open.value == tile.value && open.value < MAX_TILE_VALUE => {
                open.value *= 2;
                open.merged = true;
                open.members.push(tile);
                gained += open.value as u64;
            }
            _ => {
                let mut members = ArrayVec::new();
                members.push(tile);
                groups.push(Group {
                    value: tile.value,
                    merged: false,
                    members,
                });
            }
        }
    }

    (groups, gained)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: &[u32]) -> Vec<Tile> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Tile::new(TileId(i as u64), v, Position::new(0, i as u8)))
            .collect()
    }

    fn group_values(values: &[u32]) -> (Vec<(u32, bool)>, u64) {
        let (groups, gained) = group_line(line(values));
        (groups.iter().map(|g| (g.value, g.merged)).collect(), gained)
    }

    #[test]
    fn merged_group_does_not_absorb_third_tile() {
        assert_eq!(
            group_values(&[2, 2, 2]),
            (vec![(4, true), (2, false)], 4)
        );
    }

    #[test]
    fn four_equal_tiles_make_two_merges() {
        assert_eq!(group_values(&[2, 2, 2, 2]), (vec![(4, true), (4, true)], 8));
    }

    #[test]
    fn merge_result_never_merges_with_equal_neighbour() {
        // The 4 created from the pair of 2s must not swallow the trailing 4.
        assert_eq!(group_values(&[2, 2, 4]), (vec![(4, true), (4, false)], 4));
    }

    #[test]
    fn unequal_tiles_stay_separate() {
        assert_eq!(
            group_values(&[2, 4, 8]),
            (vec![(2, false), (4, false), (8, false)], 0)
        );
    }

    #[test]
    fn largest_tiles_do_not_merge() {
        assert_eq!(
            group_values(&[MAX_TILE_VALUE, MAX_TILE_VALUE]),
            (vec![(MAX_TILE_VALUE, false), (MAX_TILE_VALUE, false)], 0)
        );
        assert_eq!(
            group_values(&[MAX_TILE_VALUE / 2, MAX_TILE_VALUE / 2]),
            (vec![(MAX_TILE_VALUE, true)], MAX_TILE_VALUE as u64)
        );

        let mut ids = TileIds::new();
        let board =
            Board::from_values(&[[MAX_TILE_VALUE, MAX_TILE_VALUE, 0, 0]], &mut ids).unwrap();
        let before = ids.clone();
        assert!(resolve_move(&board, Direction::Left, &mut ids).is_none());
        assert_eq!(ids, before);

        let plan = resolve_move(&board, Direction::Right, &mut ids).unwrap();
        assert!(plan.merges.is_empty());
        assert_eq!(plan.score_delta, 0);
        let next = board.apply(&plan);
        assert_eq!(next.values(), vec![vec![0, 0, MAX_TILE_VALUE, MAX_TILE_VALUE]]);
        assert_eq!(next.total_value(), board.total_value());
    }

    #[test]
    fn ordering_respects_wall() {
        let mut tiles = line(&[2, 4, 8]);
        order_toward_wall(&mut tiles, Direction::Right);
        let values: Vec<u32> = tiles.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![8, 4, 2]);

        order_toward_wall(&mut tiles, Direction::Left);
        let values: Vec<u32> = tiles.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![2, 4, 8]);
    }

    #[test]
    fn rejected_move_leaves_ids_untouched() {
        let mut ids = TileIds::new();
        let board = Board::from_values(&[[2, 4, 0, 0]], &mut ids).unwrap();
        let before = ids.clone();
        assert!(resolve_move(&board, Direction::Left, &mut ids).is_none());
        assert_eq!(ids, before);
    }

    #[test]
    fn merge_sources_are_wall_side_first() {
        let mut ids = TileIds::new();
        let board = Board::from_values(&[[2, 0, 2, 0]], &mut ids).unwrap();
        let plan = resolve_move(&board, Direction::Right, &mut ids).unwrap();

        assert_eq!(plan.merges.len(), 1);
        // Processing right-to-left: the tile at col 2 is nearest the wall.
        assert_eq!(plan.merges[0].sources, [TileId(1), TileId(0)]);
        assert_eq!(plan.merges[0].position, Position::new(0, 3));
        assert_eq!(plan.merges[0].id, TileId(2));
        assert!(plan.is_merged_away(TileId(0)));
        assert!(plan.is_merged_away(TileId(1)));
        assert_eq!(plan.destination(TileId(0)), Some(Position::new(0, 3)));
        assert_eq!(plan.max_travel, 3);
    }
}
