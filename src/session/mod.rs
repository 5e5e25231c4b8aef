//! Running games.
//!
//! - `game`: `GameSession`, one game with its dice, turn flow and Death Mode ceiling
//! - `store`: `GameStore`, the registry of live sessions keyed by `GameId`

pub mod game;
pub mod store;

pub use game::{GameId, GameSession, SessionSnapshot, SessionStatus, TurnReport};
pub use store::GameStore;
