//! Move representation and history records.
//!
//! A `Move` is what a client proposes: which piece, where it claims the piece
//! is, where it claims the piece goes, and the roll that justifies it. The
//! engine checks every claim against the board before applying anything.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::piece::PieceId;
use super::team::Team;

/// A proposed move.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Move, PieceId, Team};
///
/// // Red brings piece 0 out of home on a six.
/// let exit = Move::new(Team::Red, PieceId(0), -1, 1, 6);
/// assert_eq!(exit.to_position, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece_id: PieceId,
    pub team: Team,
    pub from_position: i32,
    pub to_position: i32,
    pub dice_roll: u8,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub fn new(team: Team, piece_id: PieceId, from_position: i32, to_position: i32, dice_roll: u8) -> Self {
        Self {
            piece_id,
            team,
            from_position,
            to_position,
            dice_roll,
        }
    }
}

/// A piece sent home by a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub team: Team,
    pub piece_id: PieceId,
    /// Track cell the piece was captured on.
    pub position: i32,
}

/// Captures from a single move.
///
/// A cell holds at most one piece per opposing team, so three is the ceiling.
pub type Captures = SmallVec<[Capture; 3]>;

/// An applied move with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The move taken.
    pub mv: Move,

    /// Session turn number when the move was applied (starts at 1).
    pub turn: u32,

    /// Pieces sent home by this move.
    pub captures: Captures,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(mv: Move, turn: u32, captures: Captures) -> Self {
        Self { mv, turn, captures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_equality() {
        let a = Move::new(Team::Red, PieceId(0), 5, 8, 3);
        let b = Move::new(Team::Red, PieceId(0), 5, 8, 3);
        let c = Move::new(Team::Red, PieceId(1), 5, 8, 3);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_record_serialization() {
        let mut captures = Captures::new();
        captures.push(Capture {
            team: Team::Blue,
            piece_id: PieceId(2),
            position: 8,
        });
        let record = MoveRecord::new(Move::new(Team::Red, PieceId(0), 5, 8, 3), 4, captures);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
