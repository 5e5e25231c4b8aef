//! Pieces: the sixteen tokens on the board.
//!
//! Each team owns four pieces identified by `PieceId(0..=3)`. A piece is never
//! created or destroyed during a game; captures only send it back home.

use serde::{Deserialize, Serialize};

use super::team::Team;
use super::track::{progress, Cell, FINISH_POSITION, HOME_POSITION};

/// Pieces owned by each team.
pub const PIECES_PER_TEAM: usize = 4;

/// Piece identifier, unique within its team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the IDs of one team's roster.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECES_PER_TEAM as u8).map(PieceId)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A single piece and its location.
///
/// `position` follows the encoding in [`crate::core::track`]. The `is_home` and
/// `is_finished` flags mirror the position and are kept in sync by
/// [`Piece::set_position`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub team: Team,
    pub position: i32,
    pub is_home: bool,
    pub is_finished: bool,
}

impl Piece {
    /// Create a piece waiting at home.
    #[must_use]
    pub fn at_home(team: Team, id: PieceId) -> Self {
        Self {
            id,
            team,
            position: HOME_POSITION,
            is_home: true,
            is_finished: false,
        }
    }

    /// Move the piece and refresh its flags.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
        self.is_home = position == HOME_POSITION;
        self.is_finished = position == FINISH_POSITION;
    }

    /// Send the piece back home.
    pub fn send_home(&mut self) {
        self.set_position(HOME_POSITION);
    }

    /// On the board: neither home nor finished.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_home && !self.is_finished
    }

    /// Resolved cell, trusting the flags over the raw position.
    #[must_use]
    pub fn cell(&self) -> Option<Cell> {
        if self.is_finished {
            Some(Cell::Finished)
        } else if self.is_home {
            Some(Cell::Home)
        } else {
            Cell::at(self.team, self.position)
        }
    }

    /// Cells travelled from the team's start, or `None` at home.
    #[must_use]
    pub fn progress(&self) -> Option<i32> {
        if self.is_home {
            None
        } else {
            progress(self.team, self.position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_ids() {
        let ids: Vec<_> = PieceId::all().collect();
        assert_eq!(ids, vec![PieceId(0), PieceId(1), PieceId(2), PieceId(3)]);
        assert_eq!(PieceId::new(2).index(), 2);
        assert_eq!(format!("{}", PieceId(3)), "Piece(3)");
    }

    #[test]
    fn test_new_piece_is_home() {
        let piece = Piece::at_home(Team::Green, PieceId(1));

        assert_eq!(piece.position, HOME_POSITION);
        assert!(piece.is_home);
        assert!(!piece.is_finished);
        assert!(!piece.is_active());
        assert_eq!(piece.cell(), Some(Cell::Home));
        assert_eq!(piece.progress(), None);
    }

    #[test]
    fn test_set_position_updates_flags() {
        let mut piece = Piece::at_home(Team::Red, PieceId(0));

        piece.set_position(1);
        assert!(piece.is_active());
        assert_eq!(piece.progress(), Some(0));

        piece.set_position(FINISH_POSITION);
        assert!(piece.is_finished);
        assert!(!piece.is_home);
        assert_eq!(piece.cell(), Some(Cell::Finished));

        piece.send_home();
        assert!(piece.is_home);
        assert!(!piece.is_finished);
    }

    #[test]
    fn test_serialization() {
        let mut piece = Piece::at_home(Team::Blue, PieceId(2));
        piece.set_position(20);

        let json = serde_json::to_string(&piece).unwrap();
        let deserialized: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(piece, deserialized);
    }
}
