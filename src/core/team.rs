//! Team identification and per-team data storage.
//!
//! ## Team
//!
//! The four fixed colors, in turn order: red, blue, green, yellow.
//! Each team enters the main track at a fixed start offset.
//!
//! ## TeamMap
//!
//! Per-team data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of teams in a game. Turn order and board geometry assume exactly four.
pub const TEAM_COUNT: usize = 4;

/// One of the four team colors.
///
/// Discriminants match turn order, so `Team::Red.index() == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
}

impl Team {
    /// All teams in turn order.
    pub const ALL: [Team; TEAM_COUNT] = [Team::Red, Team::Blue, Team::Green, Team::Yellow];

    /// Get the turn-order index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the team for a turn-order index.
    ///
    /// ```
    /// use ludo_engine::core::Team;
    ///
    /// assert_eq!(Team::from_index(2), Some(Team::Green));
    /// assert_eq!(Team::from_index(4), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Team> {
        match index {
            0 => Some(Team::Red),
            1 => Some(Team::Blue),
            2 => Some(Team::Green),
            3 => Some(Team::Yellow),
            _ => None,
        }
    }

    /// Main-track cell where this team's pieces enter play.
    #[must_use]
    pub const fn start_offset(self) -> i32 {
        match self {
            Team::Red => 1,
            Team::Blue => 14,
            Team::Green => 27,
            Team::Yellow => 40,
        }
    }

    /// The team that plays after this one.
    #[must_use]
    pub const fn next(self) -> Team {
        Team::ALL[(self.index() + 1) % TEAM_COUNT]
    }

    /// Lowercase color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Green => "green",
            Team::Yellow => "yellow",
        }
    }

    /// Iterate over all teams in turn order.
    pub fn all() -> impl Iterator<Item = Team> {
        Team::ALL.into_iter()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-team data storage with O(1) access.
///
/// Backed by a `[T; 4]` with one entry per team in turn order.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Team, TeamMap};
///
/// let mut scores: TeamMap<i32> = TeamMap::with_value(0);
/// scores[Team::Blue] = 15;
///
/// assert_eq!(scores[Team::Red], 0);
/// assert_eq!(scores[Team::Blue], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; TEAM_COUNT],
}

impl<T> TeamMap<T> {
    /// Create a new TeamMap with values from a factory function.
    pub fn new(factory: impl Fn(Team) -> T) -> Self {
        Self {
            data: Team::ALL.map(factory),
        }
    }

    /// Create a new TeamMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new TeamMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a team's data.
    #[must_use]
    pub fn get(&self, team: Team) -> &T {
        &self.data[team.index()]
    }

    /// Get a mutable reference to a team's data.
    pub fn get_mut(&mut self, team: Team) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (Team, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        Team::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Team, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Team, &mut T)> {
        Team::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over values in turn order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        self.get_mut(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_index_roundtrip() {
        for (i, team) in Team::ALL.iter().enumerate() {
            assert_eq!(team.index(), i);
            assert_eq!(Team::from_index(i), Some(*team));
        }
        assert_eq!(Team::from_index(7), None);
    }

    #[test]
    fn test_start_offsets() {
        assert_eq!(Team::Red.start_offset(), 1);
        assert_eq!(Team::Blue.start_offset(), 14);
        assert_eq!(Team::Green.start_offset(), 27);
        assert_eq!(Team::Yellow.start_offset(), 40);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Team::Red.next(), Team::Blue);
        assert_eq!(Team::Green.next(), Team::Yellow);
        assert_eq!(Team::Yellow.next(), Team::Red);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Team::Yellow), "yellow");
    }

    #[test]
    fn test_team_map_new() {
        let map: TeamMap<usize> = TeamMap::new(|t| t.index() * 10);

        assert_eq!(map[Team::Red], 0);
        assert_eq!(map[Team::Blue], 10);
        assert_eq!(map[Team::Green], 20);
        assert_eq!(map[Team::Yellow], 30);
    }

    #[test]
    fn test_team_map_mutation() {
        let mut map: TeamMap<i32> = TeamMap::with_default();

        map[Team::Green] = 7;
        *map.get_mut(Team::Red) += 2;

        assert_eq!(map[Team::Green], 7);
        assert_eq!(map[Team::Red], 2);
        assert_eq!(map[Team::Blue], 0);
    }

    #[test]
    fn test_team_map_iter_order() {
        let map: TeamMap<i32> = TeamMap::with_value(1);
        let teams: Vec<_> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(teams, Team::ALL.to_vec());
    }

    #[test]
    fn test_team_serialization() {
        let json = serde_json::to_string(&Team::Blue).unwrap();
        assert_eq!(json, "\"blue\"");
        let team: Team = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(team, Team::Green);
    }
}
