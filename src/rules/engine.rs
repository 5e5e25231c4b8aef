//! The board engine: move validation and board transitions.
//!
//! `BoardEngine` holds only its `RulesConfig`. Every operation takes a
//! `BoardState` by reference; transitions return a new state, so a rejected
//! move can never leave a half-applied board behind.

use log::trace;

use crate::core::{
    position_at, BoardState, Capture, Captures, Cell, GamePhase, Move, Piece, RulesConfig, Team,
    TeamMap, DIE_FACES, EXIT_ROLL, FINISH_PROGRESS, PIECES_PER_TEAM,
};
use crate::error::MoveError;

use super::probability::win_probabilities;

/// Result of a processed move.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Board after the move.
    pub state: BoardState,

    /// The move as applied.
    pub mv: Move,

    /// Pieces sent home.
    pub captures: Captures,

    /// Set when this move won the game.
    pub winner: Option<Team>,

    /// Heuristic scores after the move (see [`win_probabilities`]).
    pub probabilities: TeamMap<f64>,
}

/// Ludo rules for one game.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{BoardState, Move, PieceId, Team};
/// use ludo_engine::rules::BoardEngine;
///
/// let engine = BoardEngine::default();
/// let state = BoardState::new();
///
/// let exit = Move::new(Team::Red, PieceId(0), -1, 1, 6);
/// assert!(engine.validate_move(&state, &exit).is_ok());
///
/// let next = engine.apply_move(&state, &exit);
/// assert_eq!(next.piece(Team::Red, PieceId(0)).unwrap().position, 1);
/// assert_eq!(next.current_team(), Team::Blue);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoardEngine {
    config: RulesConfig,
}

impl BoardEngine {
    /// Create an engine with the given rules.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Get the rules configuration.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    // === Validation ===

    /// The one legal destination for a piece and roll.
    ///
    /// A piece at home can only exit to its start cell on a six. On the lap a
    /// piece moves to `(position + roll) mod 52`; past the lap it turns into its
    /// finish lane and must land exactly on the finish.
    pub fn destination(&self, piece: &Piece, dice_roll: u8) -> Result<i32, MoveError> {
        if piece.is_finished {
            return Err(MoveError::AlreadyFinished);
        }
        if piece.is_home {
            return if dice_roll == EXIT_ROLL {
                Ok(piece.team.start_offset())
            } else {
                Err(MoveError::NeedSixToExit(dice_roll))
            };
        }
        if !(1..=DIE_FACES).contains(&dice_roll) {
            return Err(MoveError::InvalidDiceRoll(dice_roll));
        }

        let from = piece.progress().ok_or(MoveError::InvalidPiece {
            team: piece.team,
            piece: piece.id,
        })?;
        let target = from + i32::from(dice_roll);
        if target > FINISH_PROGRESS {
            return Err(MoveError::Overshoot {
                progress: from,
                roll: dice_roll,
            });
        }

        Ok(position_at(piece.team, target))
    }

    /// Check a proposed move against the board.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// phase, turn, piece, origin, roll/destination, then occupancy.
    /// An opposing piece on the destination is not an error; it will be captured.
    pub fn validate_move(&self, state: &BoardState, mv: &Move) -> Result<(), MoveError> {
        if state.game_phase != GamePhase::Playing {
            return Err(MoveError::NotPlaying(state.game_phase));
        }

        let expected = state.current_team();
        if mv.team != expected {
            return Err(MoveError::NotYourTurn {
                expected,
                actual: mv.team,
            });
        }

        let piece = state.piece(mv.team, mv.piece_id).ok_or(MoveError::InvalidPiece {
            team: mv.team,
            piece: mv.piece_id,
        })?;

        if piece.position != mv.from_position {
            return Err(MoveError::StalePosition {
                claimed: mv.from_position,
                actual: piece.position,
            });
        }

        let destination = self.destination(piece, mv.dice_roll)?;
        if destination != mv.to_position {
            return Err(MoveError::DestinationMismatch {
                claimed: mv.to_position,
                expected: destination,
            });
        }

        if self.is_blocked(state, piece, destination) {
            return Err(MoveError::Blocked(destination));
        }

        Ok(())
    }

    /// A same-team piece other than `piece` stands on the destination.
    fn is_blocked(&self, state: &BoardState, piece: &Piece, destination: i32) -> bool {
        match Cell::at(piece.team, destination) {
            Some(cell) => state
                .occupants(cell)
                .any(|other| other.team == piece.team && other.id != piece.id),
            None => false,
        }
    }

    /// Opposing pieces a `team` piece landing on `position` would send home.
    ///
    /// Only shared track cells can hold opponents; safe cells never capture.
    #[must_use]
    pub fn captures_at(&self, state: &BoardState, team: Team, position: i32) -> Captures {
        match Cell::at(team, position) {
            Some(Cell::Track(index)) if !self.config.is_safe(index) => state
                .occupants(Cell::Track(index))
                .filter(|p| p.team != team)
                .map(|p| Capture {
                    team: p.team,
                    piece_id: p.id,
                    position: p.position,
                })
                .collect(),
            _ => Captures::new(),
        }
    }

    // === Transitions ===

    /// Apply a validated move and return the new board.
    ///
    /// Relocates the piece, marks it finished on the finish cell, sends captured
    /// opponents home, advances the turn and records the roll. Not idempotent:
    /// call it once per accepted move.
    #[must_use]
    pub fn apply_move(&self, state: &BoardState, mv: &Move) -> BoardState {
        self.apply(state, mv).0
    }

    fn apply(&self, state: &BoardState, mv: &Move) -> (BoardState, Captures) {
        let mut next = state.clone();

        match next.piece_mut(mv.team, mv.piece_id) {
            Some(piece) => piece.set_position(mv.to_position),
            None => return (next, Captures::new()),
        }

        let captures = self.captures_at(&next, mv.team, mv.to_position);
        for capture in &captures {
            if let Some(piece) = next.piece_mut(capture.team, capture.piece_id) {
                piece.send_home();
            }
            trace!(
                "{} captured {} {} on cell {}",
                mv.team,
                capture.team,
                capture.piece_id,
                capture.position
            );
        }

        next.advance_turn();
        next.last_dice_roll = mv.dice_roll;

        (next, captures)
    }

    /// Validate, apply and score a move in one step.
    ///
    /// Ends the game when the move completes a team.
    pub fn process_move(&self, state: &BoardState, mv: &Move) -> Result<MoveOutcome, MoveError> {
        self.validate_move(state, mv)?;

        let (mut next, captures) = self.apply(state, mv);
        let winner = self.winner(&next);
        if winner.is_some() {
            next.game_phase = GamePhase::Finished;
        }
        let probabilities = self.compute_win_probabilities(&next);

        Ok(MoveOutcome {
            state: next,
            mv: mv.clone(),
            captures,
            winner,
            probabilities,
        })
    }

    /// Hand the turn on without moving, recording the roll.
    #[must_use]
    pub fn pass_turn(&self, state: &BoardState, dice_roll: u8) -> BoardState {
        let mut next = state.clone();
        next.advance_turn();
        next.last_dice_roll = dice_roll;
        next
    }

    // === Queries ===

    /// Every move the team to play may make with this roll.
    #[must_use]
    pub fn legal_moves(&self, state: &BoardState, dice_roll: u8) -> Vec<Move> {
        if state.game_phase != GamePhase::Playing {
            return Vec::new();
        }

        let team = state.current_team();
        state
            .team_pieces(team)
            .iter()
            .filter_map(|piece| {
                let to = self.destination(piece, dice_roll).ok()?;
                let mv = Move::new(team, piece.id, piece.position, to, dice_roll);
                self.validate_move(state, &mv).ok().map(|()| mv)
            })
            .collect()
    }

    /// True iff some team has all four pieces finished.
    #[must_use]
    pub fn check_win_condition(&self, state: &BoardState) -> bool {
        self.winner(state).is_some()
    }

    /// The first team, in turn order, with all pieces finished.
    #[must_use]
    pub fn winner(&self, state: &BoardState) -> Option<Team> {
        Team::all().find(|&team| state.finished_count(team) == PIECES_PER_TEAM)
    }

    /// Heuristic win scores summing to 100. See [`win_probabilities`].
    #[must_use]
    pub fn compute_win_probabilities(&self, state: &BoardState) -> TeamMap<f64> {
        win_probabilities(state)
    }
}
