//! A running game: board, dice and turn bookkeeping.
//!
//! The session is the only writer of its board. Each turn is
//! `roll_dice` followed by either `submit_move` (with a move for that roll)
//! or `pass` (when the roll has no legal move). Every `&mut self` method
//! either fully succeeds or leaves the session unchanged.

use im::Vector;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{BoardState, GamePhase, GameRng, GameRngState, Move, MoveRecord, SessionConfig, Team, TeamMap};
use crate::error::SessionError;
use crate::policy::{MovePolicy, TeamPolicies};
use crate::rules::{BoardEngine, MoveOutcome};

/// Game identifier, allocated by the `GameStore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Finished { winner: Team },
    /// Death Mode move ceiling reached without a winner.
    Terminated,
}

impl SessionStatus {
    #[must_use]
    pub fn is_active(self) -> bool {
        self == SessionStatus::Active
    }
}

/// What happened on one automatically played turn.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnReport {
    Moved(MoveOutcome),
    Passed { team: Team, dice_roll: u8 },
}

/// One game instance.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: GameId,
    config: SessionConfig,
    engine: BoardEngine,
    state: BoardState,
    rng: GameRng,
    pending_roll: Option<u8>,
    /// Moves and passes played so far.
    turn_count: u32,
    status: SessionStatus,
    history: Vector<MoveRecord>,
}

impl GameSession {
    /// Start a game with a fresh board.
    pub fn new(id: GameId, config: SessionConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;

        Ok(Self {
            id,
            engine: BoardEngine::new(config.rules.clone()),
            config,
            state: BoardState::new(),
            rng: GameRng::new(seed),
            pending_roll: None,
            turn_count: 0,
            status: SessionStatus::Active,
            history: Vector::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn pending_roll(&self) -> Option<u8> {
        self.pending_roll
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Current heuristic win scores.
    #[must_use]
    pub fn win_probabilities(&self) -> TeamMap<f64> {
        self.engine.compute_win_probabilities(&self.state)
    }

    /// Legal moves for the pending roll (empty with no roll pending).
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pending_roll
            .map(|roll| self.engine.legal_moves(&self.state, roll))
            .unwrap_or_default()
    }

    // === Turn flow ===

    /// Roll the die for the team to move.
    pub fn roll_dice(&mut self) -> Result<u8, SessionError> {
        self.ensure_active()?;
        if let Some(pending) = self.pending_roll {
            return Err(SessionError::RollPending(pending));
        }

        let roll = self.rng.roll_die();
        self.pending_roll = Some(roll);
        debug!("{}: {} rolled {}", self.id, self.state.current_team(), roll);
        Ok(roll)
    }

    /// Play a move for the pending roll.
    ///
    /// On rejection the roll stays pending so the same team can try again.
    pub fn submit_move(&mut self, mv: &Move) -> Result<MoveOutcome, SessionError> {
        self.ensure_active()?;
        let pending = self.pending_roll.ok_or(SessionError::NoPendingRoll)?;
        if mv.dice_roll != pending {
            return Err(SessionError::DiceMismatch {
                claimed: mv.dice_roll,
                pending,
            });
        }

        let outcome = match self.engine.process_move(&self.state, mv) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!("{}: rejected {:?}: {}", self.id, mv, err);
                return Err(err.into());
            }
        };

        self.state = outcome.state.clone();
        self.pending_roll = None;
        self.turn_count += 1;
        self.history.push_back(MoveRecord::new(
            mv.clone(),
            self.turn_count,
            outcome.captures.clone(),
        ));

        if let Some(winner) = outcome.winner {
            self.status = SessionStatus::Finished { winner };
            info!("{}: {} won after {} turns", self.id, winner, self.turn_count);
        } else {
            self.check_move_limit();
        }

        Ok(outcome)
    }

    /// Give up the turn. Only allowed when the pending roll has no legal move.
    pub fn pass(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        let pending = self.pending_roll.ok_or(SessionError::NoPendingRoll)?;

        let available = self.engine.legal_moves(&self.state, pending).len();
        if available > 0 {
            return Err(SessionError::MovesAvailable(available));
        }

        debug!("{}: {} passes on {}", self.id, self.state.current_team(), pending);
        self.state = self.engine.pass_turn(&self.state, pending);
        self.pending_roll = None;
        self.turn_count += 1;
        self.check_move_limit();
        Ok(())
    }

    /// Roll and let `policy` play the current team's turn.
    pub fn play_auto(&mut self, policy: &dyn MovePolicy) -> Result<TurnReport, SessionError> {
        let team = self.state.current_team();
        let dice_roll = self.roll_dice()?;
        let moves = self.engine.legal_moves(&self.state, dice_roll);

        match policy.choose(&self.engine, &self.state, &moves, &mut self.rng) {
            Some(mv) => self.submit_move(&mv).map(TurnReport::Moved),
            None if moves.is_empty() => {
                self.pass()?;
                Ok(TurnReport::Passed { team, dice_roll })
            }
            // Policy declined a legal move; fall back to the first one.
            None => self.submit_move(&moves[0]).map(TurnReport::Moved),
        }
    }

    /// Play turns for computer-controlled teams until a team without a policy
    /// is due to move or the game ends.
    pub fn play_computer_turns(&mut self, policies: &TeamPolicies) -> Result<Vec<TurnReport>, SessionError> {
        let mut reports = Vec::new();
        while self.status.is_active() && self.pending_roll.is_none() {
            let Some(policy) = policies.get(self.state.current_team()) else {
                break;
            };
            reports.push(self.play_auto(policy)?);
        }
        Ok(reports)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(SessionError::GameOver)
        }
    }

    fn check_move_limit(&mut self) {
        if let Some(limit) = self.config.move_limit() {
            if self.turn_count >= limit {
                self.status = SessionStatus::Terminated;
                self.state.game_phase = GamePhase::Finished;
                info!("{}: terminated at move limit {}", self.id, limit);
            }
        }
    }

    // === Snapshots ===

    /// Capture everything needed to resume this session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            config: self.config.clone(),
            state: self.state.clone(),
            rng: self.rng.state(),
            pending_roll: self.pending_roll,
            turn_count: self.turn_count,
            status: self.status,
            history: self.history.clone(),
        }
    }

    /// Resume a session from a snapshot.
    ///
    /// Snapshots come from outside the crate, so the board is checked before
    /// it is trusted.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SessionError> {
        snapshot.config.validate()?;
        snapshot.state.validate()?;

        Ok(Self {
            id: snapshot.id,
            engine: BoardEngine::new(snapshot.config.rules.clone()),
            config: snapshot.config,
            state: snapshot.state,
            rng: GameRng::from_state(&snapshot.rng),
            pending_roll: snapshot.pending_roll,
            turn_count: snapshot.turn_count,
            status: snapshot.status,
            history: snapshot.history,
        })
    }
}

/// Serializable session state for the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: GameId,
    pub config: SessionConfig,
    pub state: BoardState,
    pub rng: GameRngState,
    pub pending_roll: Option<u8>,
    pub turn_count: u32,
    pub status: SessionStatus,
    pub history: Vector<MoveRecord>,
}

impl SessionSnapshot {
    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, HOME_POSITION};
    use crate::error::{BoardError, MoveError};
    use crate::policy::GreedyPolicy;

    fn session(seed: u64) -> GameSession {
        GameSession::new(GameId(1), SessionConfig::standard(), seed).unwrap()
    }

    /// Roll until the pending roll is `want`, passing other turns.
    fn roll_until(game: &mut GameSession, want: u8) {
        loop {
            let roll = game.roll_dice().unwrap();
            if roll == want {
                return;
            }
            game.pass().unwrap();
        }
    }

    #[test]
    fn test_new_session() {
        let game = session(42);

        assert_eq!(game.id(), GameId(1));
        assert_eq!(game.status(), SessionStatus::Active);
        assert_eq!(game.pending_roll(), None);
        assert_eq!(game.turn_count(), 0);
        assert!(game.history().is_empty());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameSession::new(GameId(1), SessionConfig::death_mode(0), 1);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_roll_twice_rejected() {
        let mut game = session(42);
        let roll = game.roll_dice().unwrap();

        assert!(matches!(game.roll_dice(), Err(SessionError::RollPending(r)) if r == roll));
    }

    #[test]
    fn test_move_without_roll_rejected() {
        let mut game = session(42);
        let mv = Move::new(Team::Red, PieceId(0), HOME_POSITION, 1, 6);

        assert!(matches!(game.submit_move(&mv), Err(SessionError::NoPendingRoll)));
        assert!(matches!(game.pass(), Err(SessionError::NoPendingRoll)));
    }

    #[test]
    fn test_dice_mismatch_rejected() {
        let mut game = session(42);
        let roll = game.roll_dice().unwrap();
        let claimed = if roll == 6 { 5 } else { 6 };
        let mv = Move::new(Team::Red, PieceId(0), HOME_POSITION, 1, claimed);

        assert!(matches!(
            game.submit_move(&mv),
            Err(SessionError::DiceMismatch { .. })
        ));
        assert_eq!(game.pending_roll(), Some(roll));
    }

    #[test]
    fn test_rejected_move_keeps_roll_pending() {
        let mut game = session(3);
        roll_until(&mut game, 6);

        let team = game.state().current_team();
        let wrong = Move::new(team, PieceId(0), HOME_POSITION, 30, 6);
        let err = game.submit_move(&wrong).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Rejected(MoveError::DestinationMismatch { .. })
        ));
        assert_eq!(game.pending_roll(), Some(6));
        assert_eq!(game.state().current_team(), team);
    }

    #[test]
    fn test_submit_move_records_history() {
        let mut game = session(3);
        roll_until(&mut game, 6);

        let team = game.state().current_team();
        let mv = Move::new(team, PieceId(2), HOME_POSITION, team.start_offset(), 6);
        let turns_before = game.turn_count();
        let outcome = game.submit_move(&mv).unwrap();

        assert_eq!(outcome.mv, mv);
        assert_eq!(game.pending_roll(), None);
        assert_eq!(game.turn_count(), turns_before + 1);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].turn, turns_before + 1);
        assert_eq!(game.state().current_team(), team.next());
    }

    #[test]
    fn test_pass_rejected_with_moves_available() {
        let mut game = session(3);
        roll_until(&mut game, 6);

        assert!(matches!(game.pass(), Err(SessionError::MovesAvailable(4))));
    }

    #[test]
    fn test_death_mode_terminates() {
        let mut game = GameSession::new(GameId(7), SessionConfig::death_mode(3), 11).unwrap();

        for _ in 0..3 {
            game.play_auto(&GreedyPolicy).unwrap();
        }

        assert_eq!(game.status(), SessionStatus::Terminated);
        assert_eq!(game.turn_count(), 3);
        assert!(matches!(game.roll_dice(), Err(SessionError::GameOver)));

        // The board itself is closed too, so the engine refuses it directly.
        assert_eq!(game.state().game_phase, GamePhase::Finished);
        assert!(game.engine().legal_moves(game.state(), 6).is_empty());
        let team = game.state().current_team();
        let mv = Move::new(team, PieceId(0), HOME_POSITION, team.start_offset(), 6);
        assert_eq!(
            game.engine().validate_move(game.state(), &mv),
            Err(MoveError::NotPlaying(GamePhase::Finished))
        );
        assert_eq!(game.snapshot().state.game_phase, GamePhase::Finished);
    }

    #[test]
    fn test_snapshot_roundtrip_continues_identically() {
        let mut game = session(99);
        for _ in 0..25 {
            game.play_auto(&GreedyPolicy).unwrap();
        }

        let snapshot = game.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let mut restored = GameSession::restore(SessionSnapshot::from_bytes(&bytes).unwrap()).unwrap();

        for _ in 0..25 {
            let a = game.play_auto(&GreedyPolicy).unwrap();
            let b = restored.play_auto(&GreedyPolicy).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(game.state(), restored.state());
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = session(5);
        game.roll_dice().unwrap();

        let json = game.snapshot().to_json().unwrap();
        let restored = GameSession::restore(SessionSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.pending_roll(), game.pending_roll());
        assert_eq!(restored.snapshot(), game.snapshot());
    }

    #[test]
    fn test_restore_rejects_corrupt_board() {
        let game = session(3);
        let json = game.snapshot().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // A relabelled piece gives red three pieces and blue five.
        value["state"]["pieces"]["data"][0][1]["team"] = "blue".into();
        let snapshot = SessionSnapshot::from_json(&value.to_string()).unwrap();
        assert!(matches!(
            GameSession::restore(snapshot),
            Err(SessionError::CorruptBoard(BoardError::WrongTeam { .. }))
        ));

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["state"]["pieces"]["data"][0][1]["id"] = 0.into();
        let snapshot = SessionSnapshot::from_json(&value.to_string()).unwrap();
        assert!(matches!(
            GameSession::restore(snapshot),
            Err(SessionError::CorruptBoard(BoardError::RosterOrder { .. }))
        ));

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["state"]["pieces"]["data"][0][2]["position"] = 20.into();
        let snapshot = SessionSnapshot::from_json(&value.to_string()).unwrap();
        assert!(matches!(
            GameSession::restore(snapshot),
            Err(SessionError::CorruptBoard(BoardError::FlagMismatch { .. }))
        ));

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["state"]["current_player"] = 9.into();
        let snapshot = SessionSnapshot::from_json(&value.to_string()).unwrap();
        assert!(matches!(
            GameSession::restore(snapshot),
            Err(SessionError::CorruptBoard(BoardError::CurrentPlayer(9)))
        ));
    }
}
