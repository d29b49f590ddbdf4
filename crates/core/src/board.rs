//! Board module - the authoritative set of tiles for one grid
//!
//! The board stores tiles, not cells. A dense row-major matrix of values
//! (0 = empty) can be projected from it for empty-cell scans and game-over
//! checks, but that projection is never a second source of truth.
//!
//! Tiles are kept sorted in row-major order of their positions so two boards
//! holding the same tiles always compare equal.
//! Coordinates: (row, col) with rows top to bottom and cols left to right.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use crate::engine::MovePlan;
use crate::tile::{Tile, TileIds};
use crate::types::{Position, TileId, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

/// Contract violations detected when building a board from raw data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions {rows}x{cols} outside 1..={max}")]
    InvalidDimensions { rows: usize, cols: usize, max: u8 },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("tile value {value} at {position:?} is not a power of two >= 2")]
    InvalidValue { value: u32, position: Position },
    #[error("tile {id:?} at {position:?} lies outside the board")]
    OutOfBounds { id: TileId, position: Position },
    #[error("tiles {first:?} and {second:?} both occupy {position:?}")]
    Overlap {
        first: TileId,
        second: TileId,
        position: Position,
    },
    #[error("tile id {0:?} appears more than once")]
    DuplicateId(TileId),
}

/// The game board - `rows x cols` grid holding a set of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Sorted row-major by position
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an empty board
    pub fn new(rows: u8, cols: u8) -> Result<Self, BoardError> {
        check_dimensions(rows as usize, cols as usize)?;
        Ok(Self {
            rows,
            cols,
            tiles: Vec::new(),
        })
    }

    /// Create a board from explicit tiles, validating every invariant
    pub fn from_tiles(rows: u8, cols: u8, mut tiles: Vec<Tile>) -> Result<Self, BoardError> {
        check_dimensions(rows as usize, cols as usize)?;
        tiles.sort_by_key(|t| t.position);
        let board = Self { rows, cols, tiles };
        board.validate()?;
        Ok(board)
    }

    /// Create a board from a dense matrix of values (0 = empty).
    ///
    /// Every nonzero cell becomes a tile with a fresh id from `ids`, handed out
    /// in row-major order.
    pub fn from_values<R: AsRef<[u32]>>(values: &[R], ids: &mut TileIds) -> Result<Self, BoardError> {
        let rows = values.len();
        let cols = values.first().map(|r| r.as_ref().len()).unwrap_or(0);
        check_dimensions(rows, cols)?;

        // Validate before consuming ids so a rejected matrix leaves `ids` untouched.
        for (row, line) in values.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !is_tile_value(value) {
                    return Err(BoardError::InvalidValue {
                        value,
                        position: Position::new(row as u8, col as u8),
                    });
                }
            }
        }

        let mut tiles = Vec::new();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.as_ref().iter().enumerate() {
                if value != 0 {
                    let position = Position::new(row as u8, col as u8);
                    tiles.push(Tile::new(ids.next_id(), value, position));
                }
            }
        }

        Ok(Self {
            rows: rows as u8,
            cols: cols as u8,
            tiles,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.tiles
            .binary_search_by_key(&position, |t| t.position)
            .ok()
            .map(|idx| &self.tiles[idx])
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Value at (row, col): 0 for an empty cell, None when out of bounds
    pub fn get(&self, row: u8, col: u8) -> Option<u32> {
        let position = Position::new(row, col);
        if !self.contains(position) {
            return None;
        }
        Some(self.tile_at(position).map_or(0, |t| t.value))
    }

    /// Flat row-major value projection (`row * cols + col`)
    pub fn dense(&self) -> Vec<u32> {
        let cols = self.cols as usize;
        let mut cells = vec![0; self.rows as usize * cols];
        for tile in &self.tiles {
            cells[tile.position.row as usize * cols + tile.position.col as usize] = tile.value;
        }
        cells
    }

    /// Dense value matrix, one `Vec` per row
    pub fn values(&self) -> Vec<Vec<u32>> {
        self.dense()
            .chunks(self.cols as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        let cols = self.cols as usize;
        self.dense()
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(idx, _)| Position::new((idx / cols) as u8, (idx % cols) as u8))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == self.rows as usize * self.cols as usize
    }

    /// Sum of all tile values
    pub fn total_value(&self) -> u64 {
        self.tiles.iter().map(|t| t.value as u64).sum()
    }

    /// Largest tile value, 0 on an empty board
    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Largest tile id present, used to resume id numbering
    pub fn max_id(&self) -> Option<TileId> {
        self.tiles.iter().map(|t| t.id).max()
    }

    /// Check every data-model invariant
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen_ids = HashSet::with_capacity(self.tiles.len());
        let mut occupied: HashMap<Position, TileId> = HashMap::with_capacity(self.tiles.len());

        for tile in &self.tiles {
            if !self.contains(tile.position) {
                return Err(BoardError::OutOfBounds {
                    id: tile.id,
                    position: tile.position,
                });
            }
            if !is_tile_value(tile.value) {
                return Err(BoardError::InvalidValue {
                    value: tile.value,
                    position: tile.position,
                });
            }
            if !seen_ids.insert(tile.id) {
                return Err(BoardError::DuplicateId(tile.id));
            }
            if let Some(&first) = occupied.get(&tile.position) {
                return Err(BoardError::Overlap {
                    first,
                    second: tile.id,
                    position: tile.position,
                });
            }
            occupied.insert(tile.position, tile.id);
        }
        Ok(())
    }

    /// Apply an accepted plan, producing the post-move (pre-spawn) board.
    ///
    /// Unmerged tiles keep their id and move to their destination. Both sources
    /// of every merge disappear and the merge's successor tile takes their place.
    pub fn apply(&self, plan: &MovePlan) -> Board {
        let merged_away: HashSet<TileId> = plan
            .merges
            .iter()
            .flat_map(|m| m.sources)
            .collect();
        let destinations: HashMap<TileId, Position> =
            plan.moves.iter().map(|m| (m.id, m.to)).collect();

        let mut tiles: Vec<Tile> = Vec::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            if merged_away.contains(&tile.id) {
                continue;
            }
            debug_assert!(
                destinations.contains_key(&tile.id),
                "plan has no destination for tile {:?}",
                tile.id
            );
            let position = destinations
                .get(&tile.id)
                .copied()
                .unwrap_or(tile.position);
            tiles.push(Tile { position, ..*tile });
        }
        tiles.extend(
            plan.merges
                .iter()
                .map(|m| Tile::new(m.id, m.value, m.position)),
        );
        tiles.sort_by_key(|t| t.position);

        let next = Board {
            rows: self.rows,
            cols: self.cols,
            tiles,
        };
        debug_assert!(next.validate().is_ok(), "plan produced an invalid board");
        next
    }

    /// Insert a tile into an empty cell, keeping row-major order
    pub(crate) fn insert(&mut self, tile: Tile) {
        debug_assert!(self.contains(tile.position));
        match self
            .tiles
            .binary_search_by_key(&tile.position, |t| t.position)
        {
            Ok(_) => debug_assert!(false, "cell {:?} already occupied", tile.position),
            Err(idx) => self.tiles.insert(idx, tile),
        }
    }

    /// Remove every tile, keeping the dimensions
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            tiles: Vec::new(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.values().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if *value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
        }
        Ok(())
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), BoardError> {
    let max = MAX_BOARD_SIZE as usize;
    if rows == 0 || cols == 0 || rows > max || cols > max {
        return Err(BoardError::InvalidDimensions {
            rows,
            cols,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}
