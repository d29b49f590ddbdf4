//! Game state module - a running game
//!
//! This module ties together the core components: board, move engine, spawn
//! policy and game-over detection. It owns the tile id source and the rng, so a
//! game seeded with the same value always plays out the same way.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, BoardError};
use crate::engine::{resolve_move, MovePlan};
use crate::snapshot::GameSnapshot;
use crate::spawn::spawn_tile;
use crate::terminal::has_any_move;
use crate::tile::{Tile, TileIds};
use crate::types::{Direction, GameAction, STARTING_TILES, WIN_VALUE};

/// Slide, apply and spawn in one step.
///
/// Returns the post-spawn board and the plan, or `None` (nothing consumed from
/// `rng` or `ids`) when `direction` is not legal.
pub fn apply_direction<R: Rng + ?Sized>(
    board: &Board,
    direction: Direction,
    rng: &mut R,
    ids: &mut TileIds,
) -> Option<(Board, MovePlan)> {
    let plan = resolve_move(board, direction, ids)?;
    let mut next = board.apply(&plan);
    spawn_tile(&mut next, rng, ids);
    Some((next, plan))
}

/// One completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub plan: MovePlan,
    /// Tile added by the spawn policy (None only if the board was full)
    pub spawned: Option<Tile>,
    pub game_over: bool,
}

/// Result of [`GameState::apply_action`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved(Turn),
    /// The direction changed nothing, or the game is over
    Rejected,
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: Rng = StdRng> {
    board: Board,
    ids: TileIds,
    rng: R,
    /// Seed the rng was built from (0 when injected)
    seed: u64,
    score: u64,
    /// Accepted turns in the current episode
    moves: u32,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    won: bool,
    game_over: bool,
}

impl GameState<StdRng> {
    /// Create a new 4x4 game with the given rng seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::blank(
            Board::default(),
            StdRng::seed_from_u64(seed),
        );
        state.seed = seed;
        state.deal();
        state
    }

    /// Create a new `rows x cols` game with the given rng seed
    pub fn with_size(seed: u64, rows: u8, cols: u8) -> Result<Self, BoardError> {
        let mut state = Self::with_rng(StdRng::seed_from_u64(seed), rows, cols)?;
        state.seed = seed;
        Ok(state)
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game driven by an injected rng
    pub fn with_rng(rng: R, rows: u8, cols: u8) -> Result<Self, BoardError> {
        let mut state = Self::blank(Board::new(rows, cols)?, rng);
        state.deal();
        Ok(state)
    }

    /// Resume from an explicit board; no tiles are added
    pub fn from_board(board: Board, rng: R) -> Self {
        let mut state = Self::blank(board, rng);
        state.won = state.board.max_value() >= WIN_VALUE;
        state.game_over = !has_any_move(&state.board);
        state
    }

    fn blank(board: Board, rng: R) -> Self {
        let ids = TileIds::starting_at(board.max_id().map_or(0, |id| id.0 + 1));
        Self {
            board,
            ids,
            rng,
            seed: 0,
            score: 0,
            moves: 0,
            episode_id: 0,
            won: false,
            game_over: false,
        }
    }

    /// Spawn the starting tiles onto the (empty) board
    fn deal(&mut self) {
        for _ in 0..STARTING_TILES {
            spawn_tile(&mut self.board, &mut self.rng, &mut self.ids);
        }
        self.game_over = !has_any_move(&self.board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_tile(&self) -> u32 {
        self.board.max_value()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Play one slide.
    ///
    /// Rejected directions (and any slide after game over) return `None` and
    /// leave the game untouched: no spawn, no score change.
    pub fn apply_direction(&mut self, direction: Direction) -> Option<Turn> {
        if self.game_over {
            trace!("ignoring {} after game over", direction.as_str());
            return None;
        }

        let Some(plan) = resolve_move(&self.board, direction, &mut self.ids) else {
            trace!("rejected {}: nothing moves", direction.as_str());
            return None;
        };

        let mut next = self.board.apply(&plan);
        let spawned = spawn_tile(&mut next, &mut self.rng, &mut self.ids);
        self.board = next;

        self.score += plan.score_delta;
        self.moves += 1;
        if plan.merges.iter().any(|m| m.value >= WIN_VALUE) {
            self.won = true;
        }
        self.game_over = !has_any_move(&self.board);

        debug!(
            "episode {} move {}: {} (+{}, {} merges, travel {}){}",
            self.episode_id,
            self.moves,
            direction.as_str(),
            plan.score_delta,
            plan.merges.len(),
            plan.max_travel,
            if self.game_over { ", game over" } else { "" }
        );

        Some(Turn {
            plan,
            spawned,
            game_over: self.game_over,
        })
    }

    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        match action {
            GameAction::Slide(direction) => match self.apply_direction(direction) {
                Some(turn) => ActionOutcome::Moved(turn),
                None => ActionOutcome::Rejected,
            },
            GameAction::Restart => {
                self.restart();
                ActionOutcome::Restarted
            }
        }
    }

    /// Start a new episode on a board of the same size.
    ///
    /// The rng and id source carry on, so ids stay unique across episodes.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.moves = 0;
        self.won = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.deal();
        debug!("episode {} started", self.episode_id);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot (no allocation)
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        snap.clear();
        snap.rows = self.board.rows();
        snap.cols = self.board.cols();
        for tile in self.board.tiles() {
            snap.cells[tile.position.row as usize][tile.position.col as usize] = tile.value;
        }
        snap.score = self.score;
        snap.best_tile = self.board.max_value();
        snap.moves = self.moves;
        snap.episode_id = self.episode_id;
        snap.seed = self.seed;
        snap.won = self.won;
        snap.game_over = self.game_over;
    }
}

impl Default for GameState<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_BOARD_SIZE;

    fn seeded(values: &[[u32; 4]], seed: u64) -> GameState {
        let board = Board::from_values(values, &mut TileIds::new()).unwrap();
        GameState::from_board(board, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn new_game_deals_two_tiles() {
        let state = GameState::new(12345);
        assert_eq!(state.board().len(), STARTING_TILES);
        assert_eq!(state.board().rows(), DEFAULT_BOARD_SIZE);
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = GameState::new(7);
        let mut b = GameState::new(7);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
            assert_eq!(a.apply_direction(dir), b.apply_direction(dir));
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn accepted_turn_scores_and_spawns() {
        let mut state = seeded(
            &[[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            3,
        );
        let turn = state.apply_direction(Direction::Left).unwrap();

        assert_eq!(turn.plan.score_delta, 4);
        assert_eq!(state.score(), 4);
        assert_eq!(state.moves(), 1);
        assert_eq!(state.board().len(), 2);
        let spawned = turn.spawned.unwrap();
        assert_ne!(spawned.position, turn.plan.merges[0].position);
    }

    #[test]
    fn rejected_turn_changes_nothing() {
        let mut state = seeded(
            &[[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            3,
        );
        let before = state.board().clone();
        assert!(state.apply_direction(Direction::Up).is_none());
        assert!(state.apply_direction(Direction::Left).is_none());
        assert_eq!(state.board(), &before);
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.apply_action(GameAction::Slide(Direction::Up)), ActionOutcome::Rejected);
    }

    #[test]
    fn game_over_is_sticky_until_restart() {
        let mut state = seeded(
            &[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            3,
        );
        assert!(state.is_game_over());
        for dir in Direction::ALL {
            assert!(state.apply_direction(dir).is_none());
        }

        assert_eq!(state.apply_action(GameAction::Restart), ActionOutcome::Restarted);
        assert!(!state.is_game_over());
        assert_eq!(state.board().len(), STARTING_TILES);
        assert_eq!(state.episode_id(), 1);
    }

    #[test]
    fn last_move_can_end_the_game() {
        // Row 0 becomes [4, 8, 16, x] with x in {2, 4}; no neighbours match afterwards.
        let mut state = seeded(
            &[[2, 2, 8, 16], [8, 16, 32, 64], [16, 32, 64, 128], [32, 64, 128, 256]],
            11,
        );
        assert!(!state.is_game_over());

        let turn = state.apply_direction(Direction::Left).unwrap();
        let x = state.board().get(0, 3).unwrap();
        assert!(x == 2 || x == 4);
        assert!(turn.game_over);
        assert!(state.is_game_over());
    }

    #[test]
    fn creating_win_tile_marks_won() {
        let mut state = seeded(
            &[[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            5,
        );
        assert!(!state.won());
        state.apply_direction(Direction::Right).unwrap();
        assert!(state.won());
        assert!(!state.is_game_over());
        assert_eq!(state.best_tile(), WIN_VALUE);
    }

    #[test]
    fn merge_ids_never_collide_with_resumed_board() {
        let mut state = seeded(
            &[[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            5,
        );
        let turn = state.apply_direction(Direction::Left).unwrap();
        // Ids 0 and 1 belong to the original tiles.
        assert!(turn.plan.merges[0].id.0 >= 2);
        assert!(state.board().validate().is_ok());
    }

    #[test]
    fn snapshot_reflects_board() {
        let state = seeded(
            &[[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 8]],
            5,
        );
        let snap = state.snapshot();
        assert_eq!(snap.value(0, 0), 2);
        assert_eq!(snap.value(1, 1), 4);
        assert_eq!(snap.value(3, 3), 8);
        assert_eq!(snap.best_tile, 8);
        assert_eq!(snap.grid(), state.board().values());
    }

    #[test]
    fn free_apply_direction_slides_and_spawns() {
        let mut ids = TileIds::new();
        let board = Board::from_values(&[[2, 0, 0, 2]], &mut ids).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let (next, plan) = apply_direction(&board, Direction::Right, &mut rng, &mut ids).unwrap();
        assert_eq!(plan.score_delta, 4);
        assert_eq!(next.get(0, 3), Some(4));
        assert_eq!(next.len(), 2);

        let blocked = Board::from_values(&[[2, 4, 8, 16]], &mut ids).unwrap();
        assert!(apply_direction(&blocked, Direction::Left, &mut rng, &mut ids).is_none());
    }
}
