//! Error types.
//!
//! Rule violations are ordinary values: a rejected move leaves the board
//! untouched and the same player may try again.

use std::path::PathBuf;

use crate::core::{GamePhase, PieceId, Team};

/// Why a board from outside the engine cannot be trusted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{team} roster slot {slot} holds {found}")]
    RosterOrder { team: Team, slot: usize, found: PieceId },

    #[error("{team} roster holds a {found} piece")]
    WrongTeam { team: Team, found: Team },

    #[error("{team} {piece} has invalid position {position}")]
    InvalidPosition { team: Team, piece: PieceId, position: i32 },

    #[error("{team} {piece} flags disagree with position {position}")]
    FlagMismatch { team: Team, piece: PieceId, position: i32 },

    #[error("{team} has two pieces on position {position}")]
    Stacked { team: Team, position: i32 },

    #[error("current player {0} is out of range")]
    CurrentPlayer(usize),
}

/// Why a proposed move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is not in progress (phase: {0})")]
    NotPlaying(GamePhase),

    #[error("dice roll {0} is not between 1 and 6")]
    InvalidDiceRoll(u8),

    #[error("not your turn: {expected} to move, got {actual}")]
    NotYourTurn { expected: Team, actual: Team },

    #[error("{team} has no {piece}")]
    InvalidPiece { team: Team, piece: PieceId },

    #[error("piece is at {actual}, not {claimed}")]
    StalePosition { claimed: i32, actual: i32 },

    #[error("need a 6 to leave home, rolled {0}")]
    NeedSixToExit(u8),

    #[error("piece has already finished")]
    AlreadyFinished,

    #[error("roll of {roll} overshoots the finish from progress {progress}")]
    Overshoot { progress: i32, roll: u8 },

    #[error("invalid destination {claimed}, expected {expected}")]
    DestinationMismatch { claimed: i32, expected: i32 },

    #[error("position {0} is blocked by a piece of the same team")]
    Blocked(i32),
}

/// Errors from a running game session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("move rejected: {0}")]
    Rejected(#[from] MoveError),

    #[error("no dice roll pending")]
    NoPendingRoll,

    #[error("roll of {0} is still waiting for a move")]
    RollPending(u8),

    #[error("move claims roll {claimed}, pending roll is {pending}")]
    DiceMismatch { claimed: u8, pending: u8 },

    #[error("cannot pass: {0} legal move(s) available")]
    MovesAvailable(usize),

    #[error("game is over")]
    GameOver,

    #[error("corrupt board: {0}")]
    CorruptBoard(#[from] BoardError),

    #[error("unknown game {0}")]
    UnknownGame(u64),

    #[error("no game ids left to allocate")]
    IdsExhausted,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("binary snapshot error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("JSON snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
