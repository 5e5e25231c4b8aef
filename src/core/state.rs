//! Board state: every piece plus turn bookkeeping.
//!
//! ## BoardState
//!
//! - Four pieces per team, in roster order
//! - Current player (turn-order index, red→blue→green→yellow)
//! - Last dice roll applied
//! - Game phase
//!
//! The state is a plain value. The rules engine takes it by reference and
//! returns a new one, so callers can keep the previous board for undo or
//! comparison.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId, PIECES_PER_TEAM};
use super::team::{Team, TeamMap, TEAM_COUNT};
use super::track::{Cell, FINISH_POSITION, HOME_POSITION};
use crate::error::BoardError;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Created, not yet accepting moves.
    #[default]
    Setup,
    /// Accepting moves.
    Playing,
    /// Over: a team has won or the session hit its move ceiling.
    Finished,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Canonical board for one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    /// Each team's roster, indexed by `PieceId`.
    pub pieces: TeamMap<[Piece; PIECES_PER_TEAM]>,

    /// Turn-order index of the team to move (0..=3).
    pub current_player: usize,

    /// Roll carried by the last applied move or pass (0 before the first).
    pub last_dice_roll: u8,

    pub game_phase: GamePhase,
}

impl BoardState {
    /// Create a board ready for play: all pieces home, red to move.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self::setup();
        state.begin();
        state
    }

    /// Create a board in the setup phase.
    #[must_use]
    pub fn setup() -> Self {
        Self {
            pieces: TeamMap::new(|team| {
                [0, 1, 2, 3].map(|id| Piece::at_home(team, PieceId::new(id)))
            }),
            current_player: 0,
            last_dice_roll: 0,
            game_phase: GamePhase::Setup,
        }
    }

    /// Move from setup to playing. No effect in any other phase.
    pub fn begin(&mut self) {
        if self.game_phase == GamePhase::Setup {
            self.game_phase = GamePhase::Playing;
        }
    }

    /// Team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> Team {
        Team::ALL[self.current_player % TEAM_COUNT]
    }

    /// Hand the turn to the next team in fixed order.
    pub fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % TEAM_COUNT;
    }

    // === Pieces ===

    /// Get a team's roster.
    #[must_use]
    pub fn team_pieces(&self, team: Team) -> &[Piece; PIECES_PER_TEAM] {
        &self.pieces[team]
    }

    /// Get a piece by team and ID.
    #[must_use]
    pub fn piece(&self, team: Team, id: PieceId) -> Option<&Piece> {
        self.pieces[team].iter().find(|p| p.id == id)
    }

    /// Get a mutable piece by team and ID.
    pub fn piece_mut(&mut self, team: Team, id: PieceId) -> Option<&mut Piece> {
        self.pieces[team].iter_mut().find(|p| p.id == id)
    }

    /// Iterate over all sixteen pieces, team by team.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().flat_map(|roster| roster.iter())
    }

    /// Pieces standing on a cell. Home and finished are never "occupied".
    pub fn occupants(&self, cell: Cell) -> impl Iterator<Item = &Piece> {
        self.all_pieces()
            .filter(move |p| matches!(cell, Cell::Track(_) | Cell::Lane { .. }) && p.cell() == Some(cell))
    }

    /// Put a piece at a raw position, keeping its flags consistent.
    ///
    /// Returns false if the piece does not exist. Used when restoring boards
    /// from an external source and for building scenarios.
    pub fn place_piece(&mut self, team: Team, id: PieceId, position: i32) -> bool {
        match self.piece_mut(team, id) {
            Some(piece) => {
                piece.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Check a board that did not come from the engine.
    ///
    /// Every roster must hold its own team's pieces with ids 0..=3 in order,
    /// each position must be encodable with flags that match it, no two
    /// teammates may share a cell and the turn index must name a team.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.current_player >= TEAM_COUNT {
            return Err(BoardError::CurrentPlayer(self.current_player));
        }

        for (team, roster) in self.pieces.iter() {
            for (slot, piece) in roster.iter().enumerate() {
                if piece.id.index() != slot {
                    return Err(BoardError::RosterOrder {
                        team,
                        slot,
                        found: piece.id,
                    });
                }
                if piece.team != team {
                    return Err(BoardError::WrongTeam {
                        team,
                        found: piece.team,
                    });
                }
                if Cell::at(team, piece.position).is_none() {
                    return Err(BoardError::InvalidPosition {
                        team,
                        piece: piece.id,
                        position: piece.position,
                    });
                }
                if piece.is_home != (piece.position == HOME_POSITION)
                    || piece.is_finished != (piece.position == FINISH_POSITION)
                {
                    return Err(BoardError::FlagMismatch {
                        team,
                        piece: piece.id,
                        position: piece.position,
                    });
                }
            }

            for (i, piece) in roster.iter().enumerate().filter(|(_, p)| p.is_active()) {
                if roster[i + 1..]
                    .iter()
                    .any(|other| other.is_active() && other.position == piece.position)
                {
                    return Err(BoardError::Stacked {
                        team,
                        position: piece.position,
                    });
                }
            }
        }

        Ok(())
    }

    // === Counts ===

    /// Finished pieces for a team.
    #[must_use]
    pub fn finished_count(&self, team: Team) -> usize {
        self.pieces[team].iter().filter(|p| p.is_finished).count()
    }

    /// Pieces still at home for a team.
    #[must_use]
    pub fn home_count(&self, team: Team) -> usize {
        self.pieces[team].iter().filter(|p| p.is_home).count()
    }

    /// Pieces on the track or in the finish lane for a team.
    #[must_use]
    pub fn active_count(&self, team: Team) -> usize {
        self.pieces[team].iter().filter(|p| p.is_active()).count()
    }

    /// Total piece count. Always sixteen.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.all_pieces().count()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
