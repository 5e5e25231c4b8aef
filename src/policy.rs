//! Move policies for computer-controlled teams.
//!
//! A policy picks one move from the legal moves for the current roll:
//! - `RandomPolicy`: uniform choice
//! - `GreedyPolicy`: finish > capture > leave home > most advanced piece
//! - `DeathModePolicy`: machine teams cooperate against human teams and
//!   hunt down whichever human is about to win
//!
//! Sessions use these for automatic play and as the fallback when no external
//! advisor is available.

use crate::core::{progress, BoardState, GameRng, Move, Team, TeamMap, FINISH_POSITION, HOME_POSITION};
use crate::rules::BoardEngine;

/// Policy for choosing a move.
pub trait MovePolicy: Send + Sync {
    /// Choose one of `moves`, or `None` to pass.
    ///
    /// `moves` are the legal moves for the current team and roll; an empty
    /// slice must return `None`.
    fn choose(
        &self,
        engine: &BoardEngine,
        state: &BoardState,
        moves: &[Move],
        rng: &mut GameRng,
    ) -> Option<Move>;
}

/// Uniformly random legal move.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(
        &self,
        _engine: &BoardEngine,
        _state: &BoardState,
        moves: &[Move],
        rng: &mut GameRng,
    ) -> Option<Move> {
        rng.choose(moves).cloned()
    }
}

/// One-ply greedy policy.
///
/// Ranks moves by what they achieve immediately. Ties go to the earlier move,
/// so the choice is deterministic and the RNG is not consumed.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    const FINISH: i64 = 10_000;
    const CAPTURE: i64 = 1_000;
    const EXIT_HOME: i64 = 100;

    /// Score of the moving piece alone, ignoring captures.
    fn advance_score(state: &BoardState, mv: &Move) -> i64 {
        if mv.to_position == FINISH_POSITION {
            Self::FINISH
        } else if mv.from_position == HOME_POSITION {
            Self::EXIT_HOME
        } else {
            state
                .piece(mv.team, mv.piece_id)
                .and_then(|p| p.progress())
                .map_or(0, i64::from)
        }
    }

    fn score(engine: &BoardEngine, state: &BoardState, mv: &Move) -> i64 {
        let captures = engine.captures_at(state, mv.team, mv.to_position).len() as i64;
        captures * Self::CAPTURE + Self::advance_score(state, mv)
    }
}

impl MovePolicy for GreedyPolicy {
    fn choose(
        &self,
        engine: &BoardEngine,
        state: &BoardState,
        moves: &[Move],
        _rng: &mut GameRng,
    ) -> Option<Move> {
        highest_scoring(moves, |mv| Self::score(engine, state, mv))
    }
}

/// Policy for machine teams ganging up on human teams in Death Mode.
///
/// Machine teams never gain from capturing each other: only human pieces
/// count as captures, and landing on another machine piece is penalized.
/// Once a human team threatens to win, any move that captures one of its
/// pieces outranks everything else, the most advanced victim first.
#[derive(Clone, Debug)]
pub struct DeathModePolicy {
    humans: TeamMap<bool>,
}

impl DeathModePolicy {
    /// Finished pieces that make a human team a threat.
    pub const THREAT_FINISHED: usize = 3;
    /// Pieces close to the finish that make a human team a threat.
    pub const THREAT_NEAR_FINISH: usize = 2;
    /// Progress from which a piece counts as close to the finish.
    pub const NEAR_FINISH_PROGRESS: i32 = 46;

    const INTERCEPT: i64 = 100_000;

    /// Policy for a game where `humans` are the externally driven teams.
    #[must_use]
    pub fn new(humans: impl IntoIterator<Item = Team>) -> Self {
        let mut map = TeamMap::with_value(false);
        for team in humans {
            map[team] = true;
        }
        Self { humans: map }
    }

    #[must_use]
    pub fn is_human(&self, team: Team) -> bool {
        self.humans[team]
    }

    /// The first human team, in turn order, close to winning.
    #[must_use]
    pub fn threat(&self, state: &BoardState) -> Option<Team> {
        Team::all().filter(|&team| self.humans[team]).find(|&team| {
            let near_finish = state
                .team_pieces(team)
                .iter()
                .filter(|p| p.is_active())
                .filter(|p| p.progress().map_or(false, |n| n >= Self::NEAR_FINISH_PROGRESS))
                .count();

            state.finished_count(team) >= Self::THREAT_FINISHED
                || near_finish >= Self::THREAT_NEAR_FINISH
        })
    }

    fn score(&self, engine: &BoardEngine, state: &BoardState, threat: Option<Team>, mv: &Move) -> i64 {
        let captures = engine.captures_at(state, mv.team, mv.to_position);

        let intercepted = threat.and_then(|target| {
            captures
                .iter()
                .filter(|c| c.team == target)
                .filter_map(|c| progress(c.team, c.position))
                .max()
        });
        if let Some(victim_progress) = intercepted {
            return Self::INTERCEPT + i64::from(victim_progress);
        }

        let capture_score: i64 = captures
            .iter()
            .map(|c| {
                if self.humans[c.team] {
                    GreedyPolicy::CAPTURE
                } else {
                    -GreedyPolicy::CAPTURE
                }
            })
            .sum();

        capture_score + GreedyPolicy::advance_score(state, mv)
    }
}

impl MovePolicy for DeathModePolicy {
    fn choose(
        &self,
        engine: &BoardEngine,
        state: &BoardState,
        moves: &[Move],
        _rng: &mut GameRng,
    ) -> Option<Move> {
        let threat = self.threat(state);
        highest_scoring(moves, |mv| self.score(engine, state, threat, mv))
    }
}

/// First move with the strictly highest score.
fn highest_scoring(moves: &[Move], mut score: impl FnMut(&Move) -> i64) -> Option<Move> {
    let mut best: Option<(i64, &Move)> = None;
    for mv in moves {
        let s = score(mv);
        if best.map_or(true, |(top, _)| s > top) {
            best = Some((s, mv));
        }
    }
    best.map(|(_, mv)| mv.clone())
}

/// Policy per team, for mixed human/computer games.
///
/// Teams without a policy are driven from outside.
#[derive(Default)]
pub struct TeamPolicies {
    policies: [Option<Box<dyn MovePolicy>>; 4],
}

impl TeamPolicies {
    /// No computer-controlled teams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Death Mode lineup: every team not in `humans` plays [`DeathModePolicy`].
    #[must_use]
    pub fn death_mode(humans: &[Team]) -> Self {
        let policy = DeathModePolicy::new(humans.iter().copied());
        Team::all()
            .filter(|team| !humans.contains(team))
            .fold(Self::new(), |policies, team| policies.with(team, policy.clone()))
    }

    /// Assign a policy to a team.
    #[must_use]
    pub fn with(mut self, team: Team, policy: impl MovePolicy + 'static) -> Self {
        self.policies[team.index()] = Some(Box::new(policy));
        self
    }

    /// The policy controlling a team, if any.
    #[must_use]
    pub fn get(&self, team: Team) -> Option<&dyn MovePolicy> {
        self.policies[team.index()].as_deref()
    }

    /// Teams with no policy, in turn order.
    #[must_use]
    pub fn human_teams(&self) -> Vec<Team> {
        Team::all().filter(|&team| self.get(team).is_none()).collect()
    }
}
