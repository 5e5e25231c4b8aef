//! Core board types: teams, pieces, track geometry, state, moves, RNG, configuration.
//!
//! Everything here is plain data. Rules live in `rules`; running games in `session`.

pub mod team;
pub mod piece;
pub mod track;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use team::{Team, TeamMap, TEAM_COUNT};
pub use piece::{Piece, PieceId, PIECES_PER_TEAM};
pub use track::{
    position_at, progress, Cell, EXIT_ROLL, FINISH_POSITION, FINISH_PROGRESS, HOME_POSITION,
    LANE_LENGTH, LAP_LENGTH, TRACK_LENGTH,
};
pub use rng::{GameRng, GameRngState, DIE_FACES};
pub use config::{RulesConfig, SessionConfig, DEFAULT_MAX_MOVES};
pub use action::{Capture, Captures, Move, MoveRecord};
pub use state::{BoardState, GamePhase};
