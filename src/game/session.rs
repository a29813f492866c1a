use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::UnoGame;

/// One hosted game plus the bookkeeping a host keeps around it.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub game: UnoGame,
    pub created_at: DateTime<Utc>,
    /// Refreshed by every command; turn-timeout policy compares this
    /// against the wall clock.
    pub last_command_at: DateTime<Utc>,
}

impl GameSession {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            game: UnoGame::new(),
            created_at: now,
            last_command_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotFound(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "no game session with id {id}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// In-memory registry of running games. The single lock serializes every
/// command, which keeps mutations on any one game from interleaving.
/// Sessions do not survive the process.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a fresh, empty game and returns its id.
    pub fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = GameSession::new(id.clone());
        self.lock().insert(id.clone(), session);
        info!("created game session {id}");
        id
    }

    /// Runs a command against the given game and stamps the session's
    /// last-command time.
    pub fn with_game<R>(
        &self,
        id: &str,
        command: impl FnOnce(&mut UnoGame) -> R,
    ) -> Result<R, SessionError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let result = command(&mut session.game);
        session.last_command_at = Utc::now();
        Ok(result)
    }

    /// Read-only projection of a session; does not refresh the command
    /// time.
    pub fn read_session<R>(
        &self,
        id: &str,
        read: impl FnOnce(&GameSession) -> R,
    ) -> Result<R, SessionError> {
        let sessions = self.lock();
        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(read(session))
    }

    /// Ids of every running session.
    pub fn list_sessions(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        match self.lock().remove(id) {
            Some(_) => {
                info!("deleted game session {id}");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, GameSession>> {
        self.sessions.lock().expect("session registry lock poisoned")
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sessions_are_listed() {
        let manager = SessionManager::new();
        let id = manager.create_session();

        assert!(manager.list_sessions().contains(&id));
    }

    #[test]
    fn with_game_mutates_and_stamps_the_session() {
        let manager = SessionManager::new();
        let id = manager.create_session();
        let created_at = manager.read_session(&id, |session| session.created_at).unwrap();

        manager
            .with_game(&id, |game| {
                game.start_game(vec!["a".to_string(), "b".to_string()]);
            })
            .unwrap();

        let (seats, stamped) = manager
            .read_session(&id, |session| {
                (session.game.players().len(), session.last_command_at)
            })
            .unwrap();
        assert_eq!(seats, 2);
        assert!(stamped >= created_at);
    }

    #[test]
    fn deleted_sessions_are_gone() {
        let manager = SessionManager::new();
        let id = manager.create_session();

        manager.delete_session(&id).unwrap();

        assert_eq!(manager.with_game(&id, |_| ()), Err(SessionError::NotFound(id.clone())));
        assert!(manager.list_sessions().is_empty());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let manager = SessionManager::new();

        let err = manager.delete_session("missing").unwrap_err();
        assert_eq!(err.to_string(), "no game session with id missing");
    }
}
