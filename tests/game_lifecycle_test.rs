//! Integration tests for a running game: turns, restart and input gating

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tui_2048::core::{ActionOutcome, Board, GameState, TileIds};
use tui_2048::input::{handle_key_event, InputGate};
use tui_2048::types::{Direction, GameAction, STARTING_TILES};

fn play_until_stuck(state: &mut GameState, limit: usize) -> usize {
    let mut turns = 0;
    while !state.is_game_over() && turns < limit {
        let moved = Direction::ALL
            .into_iter()
            .any(|dir| state.apply_direction(dir).is_some());
        assert!(moved, "no direction accepted but game is not over");
        turns += 1;
    }
    turns
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.board().len(), STARTING_TILES);
    assert!(!state.is_game_over());

    let turns = play_until_stuck(&mut state, 10_000);
    assert!(state.is_game_over());
    assert_eq!(state.moves() as usize, turns);
    assert!(state.score() > 0);
    assert!(state.board().is_full());

    // Slides after game over are rejected without touching the board.
    let before = state.board().clone();
    for dir in Direction::ALL {
        assert_eq!(
            state.apply_action(GameAction::Slide(dir)),
            ActionOutcome::Rejected
        );
    }
    assert_eq!(state.board(), &before);

    assert_eq!(state.apply_action(GameAction::Restart), ActionOutcome::Restarted);
    assert!(!state.is_game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves(), 0);
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.board().len(), STARTING_TILES);
}

#[test]
fn test_score_is_sum_of_turn_deltas() {
    let mut state = GameState::new(99);
    let mut total = 0;
    for dir in [Direction::Left, Direction::Down, Direction::Right, Direction::Up].repeat(25) {
        if let Some(turn) = state.apply_direction(dir) {
            total += turn.plan.score_delta;
            assert!(turn.plan.max_travel >= 1);
        }
    }
    assert_eq!(state.score(), total);
}

#[test]
fn test_ids_stay_unique_across_restarts() {
    let mut state = GameState::new(3);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..3 {
        play_until_stuck(&mut state, 200);
        for tile in state.board().tiles() {
            assert!(seen.insert(tile.id), "id {:?} reused", tile.id);
        }
        state.restart();
    }
}

#[test]
fn test_injected_rng_drives_spawns() {
    let board = Board::from_values(&[[2, 2], [0, 0]], &mut TileIds::new()).unwrap();
    let mut a = GameState::from_board(board.clone(), StdRng::seed_from_u64(8));
    let mut b = GameState::from_board(board, StdRng::seed_from_u64(8));

    let ta = a.apply_direction(Direction::Left).unwrap();
    let tb = b.apply_direction(Direction::Left).unwrap();
    assert_eq!(ta.spawned, tb.spawned);
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_win_does_not_stop_play() {
    let board = Board::from_values(
        &[[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        &mut TileIds::new(),
    )
    .unwrap();
    let mut state = GameState::from_board(board, StdRng::seed_from_u64(1));
    assert!(!state.won());

    state.apply_direction(Direction::Left).unwrap();
    assert!(state.won());
    assert_eq!(state.best_tile(), 2048);
    assert!(!state.is_game_over());
    assert!(state.apply_direction(Direction::Right).is_some());
    assert!(state.won());
}

#[test]
fn test_keys_through_the_gate() {
    let mut state = GameState::new(21);
    let mut gate = InputGate::with_step_ms(10);

    let press = |code: KeyCode| handle_key_event(KeyEvent::from(code));

    // Find a direction that is accepted, then check the gate drops the next slide.
    let mut accepted = None;
    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down] {
        let action = gate.accept(press(code).unwrap()).unwrap();
        if let ActionOutcome::Moved(turn) = state.apply_action(action) {
            gate.begin_turn(turn.plan.max_travel);
            accepted = Some(turn);
            break;
        }
    }
    let turn = accepted.expect("a fresh game always has a legal move");
    assert!(gate.busy());
    assert_eq!(gate.accept(press(KeyCode::Down).unwrap()), None);

    // Restart is never gated.
    assert_eq!(
        gate.accept(press(KeyCode::Char('r')).unwrap()),
        Some(GameAction::Restart)
    );
    assert!(!gate.busy());

    gate.begin_turn(turn.plan.max_travel);
    gate.update(turn.plan.max_travel * 10);
    assert!(!gate.busy());
    assert!(gate.accept(press(KeyCode::Up).unwrap()).is_some());
}
