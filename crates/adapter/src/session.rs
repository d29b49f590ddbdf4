//! Session: one game driven by protocol messages.
//!
//! A session answers every inbound line with exactly one outbound message.
//! Malformed input becomes an `error` message; it never panics and never
//! touches the game.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::core::{GameState, SnapshotView};
use crate::protocol::{ClientMessage, ErrorCode, ServerMessage};
use crate::types::{Direction, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_PLAYABLE_SIZE};

/// Defaults applied when `new_game` omits a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u64,
    pub size: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            size: DEFAULT_BOARD_SIZE,
        }
    }
}

pub struct Session {
    config: SessionConfig,
    game: GameState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let game = GameState::with_size(config.seed, config.size, config.size)
            .unwrap_or_else(|err| {
                warn!("invalid session size {}: {err}; using default", config.size);
                GameState::new(config.seed)
            });
        Self { config, game }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn observation(&self) -> SnapshotView {
        SnapshotView::from(&self.game.snapshot())
    }

    /// Parse and answer one raw line.
    pub fn handle_line(&mut self, line: &str) -> ServerMessage {
        match ClientMessage::parse(line) {
            Ok(msg) => self.handle(msg),
            Err(err) => {
                let code = if err.is_data() {
                    ErrorCode::InvalidCommand
                } else {
                    ErrorCode::InvalidJson
                };
                debug!("bad line ({}): {err}", code.as_str());
                ServerMessage::error(code, err.to_string())
            }
        }
    }

    pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
        match msg {
            ClientMessage::NewGame { seed, size } => {
                let seed = seed.unwrap_or(self.config.seed);
                let size = size.unwrap_or(self.config.size);
                if !(MIN_PLAYABLE_SIZE..=MAX_BOARD_SIZE).contains(&size) {
                    return ServerMessage::error(
                        ErrorCode::InvalidSize,
                        format!("size must be in {MIN_PLAYABLE_SIZE}..={MAX_BOARD_SIZE}, got {size}"),
                    );
                }
                match GameState::with_size(seed, size, size) {
                    Ok(game) => {
                        info!("new game: seed {seed}, {size}x{size}");
                        self.game = game;
                        ServerMessage::Observation(self.observation())
                    }
                    Err(err) => ServerMessage::error(ErrorCode::InvalidSize, err.to_string()),
                }
            }
            ClientMessage::Move { direction } => {
                let Some(direction) = Direction::from_str(&direction) else {
                    return ServerMessage::error(
                        ErrorCode::InvalidDirection,
                        format!("unknown direction {direction:?}"),
                    );
                };
                match self.game.apply_direction(direction) {
                    Some(turn) => ServerMessage::Turn {
                        plan: turn.plan,
                        spawned: turn.spawned,
                        observation: self.observation(),
                    },
                    None => ServerMessage::Rejected {
                        direction,
                        observation: self.observation(),
                    },
                }
            }
            ClientMessage::Observe => ServerMessage::Observation(self.observation()),
            ClientMessage::Restart => {
                self.game.restart();
                ServerMessage::Observation(self.observation())
            }
        }
    }

    /// Serve line-delimited JSON until `input` is exhausted.
    ///
    /// Blank lines are skipped. Only I/O failures end the loop early.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        for line in input.lines() {
            let line = line.context("read command line")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let reply = self.handle_line(line);
            let text = reply.to_line().context("serialize reply")?;
            writeln!(output, "{text}").context("write reply")?;
            output.flush().context("flush reply")?;
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
