//! # ludo-engine
//!
//! Rules and session management for four-player Ludo.
//!
//! ## Design Principles
//!
//! 1. **The roll is input**: The rules engine never rolls dice. Sessions own
//!    a seeded RNG, so the same seed and moves replay identically.
//!
//! 2. **Boards are values**: `BoardEngine` takes a `BoardState` and returns a
//!    new one. A rejected move changes nothing.
//!
//! 3. **Closed model**: Four `Team`s, four `Piece`s each, positions with a
//!    single encoding for every team (see `core::track`).
//!
//! ## Modules
//!
//! - `core`: Teams, pieces, track geometry, board state, moves, RNG, configuration
//! - `rules`: `BoardEngine` (validation, transitions, wins) and win scoring
//! - `policy`: Automatic move choice for computer-controlled teams
//! - `session`: `GameSession` turn flow, Death Mode ceiling, and `GameStore`
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod rules;
pub mod policy;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BoardState, Capture, Cell, GamePhase, GameRng, Move, MoveRecord, Piece, PieceId,
    RulesConfig, SessionConfig, Team, TeamMap,
};

pub use crate::error::{BoardError, ConfigError, MoveError, SessionError};

pub use crate::rules::{BoardEngine, MoveOutcome};

pub use crate::policy::{DeathModePolicy, GreedyPolicy, MovePolicy, RandomPolicy, TeamPolicies};

pub use crate::session::{GameId, GameSession, GameStore, SessionSnapshot, SessionStatus, TurnReport};
