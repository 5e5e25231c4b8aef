//! Ludo rules.
//!
//! - `engine`: `BoardEngine`, which validates and applies moves and detects wins
//! - `probability`: the heuristic win-score used for display
//!
//! Rules never touch dice or sessions; the roll is always an input.

pub mod engine;
pub mod probability;

pub use engine::{BoardEngine, MoveOutcome};
pub use probability::{team_score, win_probabilities};
