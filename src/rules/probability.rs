//! Heuristic win scores for display.
//!
//! These are NOT calibrated probabilities. Each team gets
//! `40·finished + 15·active − 5·home`, clamped to `[0, 100]`, and the four
//! clamped scores are scaled to sum to 100. With no progress anywhere every
//! team shows 25.

use crate::core::{BoardState, Team, TeamMap, TEAM_COUNT};

pub const FINISHED_WEIGHT: i32 = 40;
pub const ACTIVE_WEIGHT: i32 = 15;
pub const HOME_PENALTY: i32 = 5;

/// Raw, unclamped score for one team.
#[must_use]
pub fn team_score(state: &BoardState, team: Team) -> i32 {
    let finished = state.finished_count(team) as i32;
    let active = state.active_count(team) as i32;
    let home = state.home_count(team) as i32;

    finished * FINISHED_WEIGHT + active * ACTIVE_WEIGHT - home * HOME_PENALTY
}

/// Normalized heuristic scores, one per team, summing to 100.
#[must_use]
pub fn win_probabilities(state: &BoardState) -> TeamMap<f64> {
    let clamped = TeamMap::new(|team| f64::from(team_score(state, team).clamp(0, 100)));
    let total: f64 = clamped.values().sum();

    if total <= 0.0 {
        return TeamMap::with_value(100.0 / TEAM_COUNT as f64);
    }

    TeamMap::new(|team| clamped[team] / total * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, FINISH_POSITION};

    fn sum(map: &TeamMap<f64>) -> f64 {
        map.values().sum()
    }

    #[test]
    fn test_initial_state_is_uniform() {
        let state = BoardState::new();

        for team in Team::all() {
            assert_eq!(team_score(&state, team), -20);
        }

        let probs = win_probabilities(&state);
        for (_, &p) in probs.iter() {
            assert_eq!(p, 25.0);
        }
    }

    #[test]
    fn test_single_leader_takes_everything() {
        let mut state = BoardState::new();
        state.place_piece(Team::Red, PieceId(0), 10);

        // Red: 15 - 15 = 0 → still all zero → uniform.
        assert_eq!(team_score(&state, Team::Red), 0);
        assert_eq!(win_probabilities(&state)[Team::Red], 25.0);

        state.place_piece(Team::Red, PieceId(1), 12);
        // Red: 30 - 10 = 20, everyone else clamps to 0.
        let probs = win_probabilities(&state);
        assert_eq!(probs[Team::Red], 100.0);
        assert_eq!(probs[Team::Blue], 0.0);
    }

    #[test]
    fn test_clamp_then_normalize() {
        let mut state = BoardState::new();
        for id in 0..3 {
            state.place_piece(Team::Red, PieceId(id), FINISH_POSITION);
        }
        state.place_piece(Team::Red, PieceId(3), 30);
        state.place_piece(Team::Blue, PieceId(0), 20);
        state.place_piece(Team::Blue, PieceId(1), 22);
        state.place_piece(Team::Blue, PieceId(2), 24);

        assert_eq!(team_score(&state, Team::Red), 135);
        assert_eq!(team_score(&state, Team::Blue), 40);

        // Red clamps to 100, blue stays 40: 100/140 and 40/140.
        let probs = win_probabilities(&state);
        assert!((probs[Team::Red] - 100.0 / 140.0 * 100.0).abs() < 1e-9);
        assert!((probs[Team::Blue] - 40.0 / 140.0 * 100.0).abs() < 1e-9);
        assert_eq!(probs[Team::Green], 0.0);
        assert!((sum(&probs) - 100.0).abs() < 1e-9);
    }
}
