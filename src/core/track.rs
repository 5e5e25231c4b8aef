//! Board geometry: the shared main track and each team's finish lane.
//!
//! Positions are plain integers so they pass through the session layer unchanged:
//!
//! | position   | meaning                                  |
//! |------------|------------------------------------------|
//! | `-1`       | home                                     |
//! | `0..=51`   | main-track cell (shared by all teams)    |
//! | `52..=56`  | finish-lane step 0..=4 (team-private)    |
//! | `57`       | finished                                 |
//!
//! A piece's *progress* counts cells travelled from its team's start cell.
//! Progress `0..=50` is one lap of the main track, `51..=55` is the finish lane,
//! and `56` is the finish. The same formula applies to every team.

use serde::{Deserialize, Serialize};

use super::team::Team;

/// Cells on the shared circular track.
pub const TRACK_LENGTH: i32 = 52;

/// Main-track cells a piece covers before turning into its finish lane.
pub const LAP_LENGTH: i32 = 51;

/// Cells in each team's finish lane, not counting the finish itself.
pub const LANE_LENGTH: i32 = 5;

/// Progress at which a piece is finished (56 for every team).
pub const FINISH_PROGRESS: i32 = LAP_LENGTH + LANE_LENGTH;

/// Position of a piece waiting at home.
pub const HOME_POSITION: i32 = -1;

/// Position of a finished piece.
pub const FINISH_POSITION: i32 = TRACK_LENGTH + LANE_LENGTH;

/// Roll needed to bring a piece out of home.
pub const EXIT_ROLL: u8 = 6;

/// A resolved board location.
///
/// Lane cells carry their team, so two teams at the same lane step never
/// share a cell even though their raw positions are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Home,
    Track(u8),
    Lane { team: Team, step: u8 },
    Finished,
}

impl Cell {
    /// Resolve a raw position for a team's piece.
    ///
    /// Returns `None` for positions outside the encoded range.
    #[must_use]
    pub fn at(team: Team, position: i32) -> Option<Cell> {
        match position {
            HOME_POSITION => Some(Cell::Home),
            FINISH_POSITION => Some(Cell::Finished),
            p if (0..TRACK_LENGTH).contains(&p) => Some(Cell::Track(p as u8)),
            p if (TRACK_LENGTH..FINISH_POSITION).contains(&p) => Some(Cell::Lane {
                team,
                step: (p - TRACK_LENGTH) as u8,
            }),
            _ => None,
        }
    }

    /// Main-track index, if this is a shared track cell.
    #[must_use]
    pub fn track_index(self) -> Option<u8> {
        match self {
            Cell::Track(index) => Some(index),
            _ => None,
        }
    }
}

/// Cells travelled from the team's start cell, or `None` at home.
///
/// ```
/// use ludo_engine::core::{progress, Team};
///
/// assert_eq!(progress(Team::Blue, 14), Some(0));
/// assert_eq!(progress(Team::Blue, 13), Some(51));
/// assert_eq!(progress(Team::Blue, -1), None);
/// ```
#[must_use]
pub fn progress(team: Team, position: i32) -> Option<i32> {
    match Cell::at(team, position)? {
        Cell::Home => None,
        Cell::Track(index) => Some((i32::from(index) - team.start_offset()).rem_euclid(TRACK_LENGTH)),
        Cell::Lane { step, .. } => Some(LAP_LENGTH + i32::from(step)),
        Cell::Finished => Some(FINISH_PROGRESS),
    }
}

/// Raw position for a team's piece at the given progress.
///
/// Progress must be in `0..=FINISH_PROGRESS`.
#[must_use]
pub fn position_at(team: Team, progress: i32) -> i32 {
    debug_assert!((0..=FINISH_PROGRESS).contains(&progress));

    if progress < LAP_LENGTH {
        (team.start_offset() + progress) % TRACK_LENGTH
    } else {
        TRACK_LENGTH + (progress - LAP_LENGTH)
    }
}
