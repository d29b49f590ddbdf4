//! Snapshot module - copyable view of a running game for renderers and the harness

use serde::Serialize;

use crate::types::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

const MAX: usize = MAX_BOARD_SIZE as usize;

/// Copyable, allocation-free view of a running game.
///
/// Renderers and observers read this instead of borrowing the game. Only the
/// top-left `rows x cols` corner of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: [[u32; MAX]; MAX],
    pub rows: u8,
    pub cols: u8,
    pub score: u64,
    pub best_tile: u32,
    pub moves: u32,
    pub episode_id: u32,
    pub seed: u64,
    pub won: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[0; MAX]; MAX];
        self.rows = DEFAULT_BOARD_SIZE;
        self.cols = DEFAULT_BOARD_SIZE;
        self.score = 0;
        self.best_tile = 0;
        self.moves = 0;
        self.episode_id = 0;
        self.seed = 0;
        self.won = false;
        self.game_over = false;
    }

    /// Value at (row, col), 0 for empty or out-of-range cells
    pub fn value(&self, row: u8, col: u8) -> u32 {
        if row >= self.rows || col >= self.cols {
            return 0;
        }
        self.cells[row as usize][col as usize]
    }

    /// The meaningful part of the grid as owned rows
    pub fn grid(&self) -> Vec<Vec<u32>> {
        self.cells[..self.rows as usize]
            .iter()
            .map(|row| row[..self.cols as usize].to_vec())
            .collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[0; MAX]; MAX],
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            score: 0,
            best_tile: 0,
            moves: 0,
            episode_id: 0,
            seed: 0,
            won: false,
            game_over: false,
        }
    }
}

/// Serialized form used by the headless harness
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotView {
    pub grid: Vec<Vec<u32>>,
    pub score: u64,
    #[serde(rename = "best")]
    pub best_tile: u32,
    pub moves: u32,
    pub episode_id: u32,
    pub won: bool,
    pub game_over: bool,
}

impl From<&GameSnapshot> for SnapshotView {
    fn from(snap: &GameSnapshot) -> Self {
        Self {
            grid: snap.grid(),
            score: snap.score,
            best_tile: snap.best_tile,
            moves: snap.moves,
            episode_id: snap.episode_id,
            won: snap.won,
            game_over: snap.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_trimmed_to_dimensions() {
        let mut snap = GameSnapshot {
            rows: 2,
            cols: 3,
            ..GameSnapshot::default()
        };
        snap.cells[0][0] = 2;
        snap.cells[1][2] = 8;
        snap.cells[5][5] = 64;

        assert_eq!(snap.grid(), vec![vec![2, 0, 0], vec![0, 0, 8]]);
        assert_eq!(snap.value(1, 2), 8);
        assert_eq!(snap.value(5, 5), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut snap = GameSnapshot::default();
        snap.cells[0][0] = 4;
        snap.score = 10;
        snap.game_over = true;
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }
}
