//! Session registry keyed by game id.
//!
//! The store is an ordinary value owned by whoever coordinates games; there
//! is no process-wide registry. Sessions are created and retired alongside
//! their games.

use log::info;
use rustc_hash::FxHashMap;

use super::game::{GameId, GameSession, SessionSnapshot};
use crate::core::SessionConfig;
use crate::error::SessionError;

/// Owns every live session.
#[derive(Debug, Default)]
pub struct GameStore {
    sessions: FxHashMap<GameId, GameSession>,
    next_id: u64,
}

impl GameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new game and return its id.
    pub fn create(&mut self, config: SessionConfig, seed: u64) -> Result<GameId, SessionError> {
        let id = GameId(self.next_id);
        let next_id = self.next_id.checked_add(1).ok_or(SessionError::IdsExhausted)?;
        let session = GameSession::new(id, config, seed)?;
        self.next_id = next_id;
        self.sessions.insert(id, session);
        info!("{}: created", id);
        Ok(id)
    }

    /// Resume a game from a snapshot, keeping its id.
    ///
    /// Replaces any live session with the same id.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<GameId, SessionError> {
        let session = GameSession::restore(snapshot)?;
        let id = session.id();
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.sessions.insert(id, session);
        info!("{}: restored", id);
        Ok(id)
    }

    /// Get a session.
    #[must_use]
    pub fn get(&self, id: GameId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    /// Get a mutable session.
    pub fn get_mut(&mut self, id: GameId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id)
    }

    /// Get a mutable session or `UnknownGame`.
    pub fn session_mut(&mut self, id: GameId) -> Result<&mut GameSession, SessionError> {
        self.sessions.get_mut(&id).ok_or(SessionError::UnknownGame(id.0))
    }

    /// Remove a session, returning it.
    pub fn remove(&mut self, id: GameId) -> Option<GameSession> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            info!("{}: removed", id);
        }
        removed
    }

    /// Remove every finished or terminated session, returning their ids sorted.
    pub fn retire_finished(&mut self) -> Vec<GameId> {
        let mut done: Vec<GameId> = self
            .sessions
            .iter()
            .filter(|(_, s)| !s.status().is_active())
            .map(|(&id, _)| id)
            .collect();
        done.sort_unstable();

        for id in &done {
            self.remove(*id);
        }
        done
    }

    /// Ids of live sessions, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_allocates_sequential_ids() {
        let mut store = GameStore::new();

        let a = store.create(SessionConfig::standard(), 1).unwrap();
        let b = store.create(SessionConfig::death_mode(100), 2).unwrap();

        assert_eq!(a, GameId(0));
        assert_eq!(b, GameId(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.ids(), vec![a, b]);
        assert!(store.get(b).unwrap().config().death_mode);
    }

    #[test]
    fn test_create_invalid_config_does_not_consume_id() {
        let mut store = GameStore::new();

        assert!(store.create(SessionConfig::death_mode(0), 1).is_err());
        assert!(store.is_empty());
        assert_eq!(store.create(SessionConfig::standard(), 1).unwrap(), GameId(0));
    }

    #[test]
    fn test_unknown_game() {
        let mut store = GameStore::new();

        assert!(store.get(GameId(5)).is_none());
        assert!(matches!(
            store.session_mut(GameId(5)),
            Err(SessionError::UnknownGame(5))
        ));
    }

    #[test]
    fn test_remove() {
        let mut store = GameStore::new();
        let id = store.create(SessionConfig::standard(), 1).unwrap();

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_advances_next_id() {
        let mut store = GameStore::new();
        let id = store.create(SessionConfig::standard(), 1).unwrap();
        let mut snap = store.remove(id).unwrap().snapshot();
        snap.id = GameId(10);

        let mut other = GameStore::new();
        assert_eq!(other.restore(snap).unwrap(), GameId(10));
        assert_eq!(other.create(SessionConfig::standard(), 2).unwrap(), GameId(11));
    }

    #[test]
    fn test_restore_highest_id() {
        let mut store = GameStore::new();
        let id = store.create(SessionConfig::standard(), 1).unwrap();
        let mut snap = store.remove(id).unwrap().snapshot();
        snap.id = GameId(u64::MAX);

        assert_eq!(store.restore(snap).unwrap(), GameId(u64::MAX));
        assert_eq!(store.len(), 1);
        assert!(store.get(GameId(u64::MAX)).is_some());

        // The restored game keeps its slot.
        assert!(matches!(
            store.create(SessionConfig::standard(), 2),
            Err(SessionError::IdsExhausted)
        ));
        assert_eq!(store.len(), 1);
    }
}
