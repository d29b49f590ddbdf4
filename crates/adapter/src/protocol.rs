//! Protocol message definitions for the headless harness
//!
//! One JSON object per line in each direction. Every message carries a `type`
//! tag in snake_case.

use serde::{Deserialize, Serialize};

use crate::core::{MovePlan, SnapshotView, Tile};
use crate::types::Direction;

// ============== Client -> Harness Messages ==============

/// A single inbound line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start a fresh game. Missing fields fall back to the session defaults.
    NewGame {
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        size: Option<u8>,
    },
    /// Slide in one direction.
    ///
    /// Kept as a string so an unknown direction gets its own error code
    /// instead of a generic parse failure.
    Move { direction: String },
    Observe,
    Restart,
}

impl ClientMessage {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

// ============== Harness -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidCommand,
    InvalidDirection,
    InvalidSize,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::InvalidDirection => "invalid_direction",
            ErrorCode::InvalidSize => "invalid_size",
        }
    }
}

/// A single outbound line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Observation(SnapshotView),
    /// An accepted slide with the spawn that followed it
    Turn {
        plan: MovePlan,
        #[serde(skip_serializing_if = "Option::is_none")]
        spawned: Option<Tile>,
        observation: SnapshotView,
    },
    /// The direction changed nothing (or the game is over)
    Rejected {
        direction: Direction,
        observation: SnapshotView,
    },
    Error { code: ErrorCode, message: String },
}

impl ServerMessage {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code,
            message: message.into(),
        }
    }

    pub fn type_str(&self) -> &'static str {
        match self {
            ServerMessage::Observation(_) => "observation",
            ServerMessage::Turn { .. } => "turn",
            ServerMessage::Rejected { .. } => "rejected",
            ServerMessage::Error { .. } => "error",
        }
    }

    /// Serialize as a single line without the trailing newline
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
