//! In-process session store.

use std::sync::RwLock;

use super::{Session, SessionError, SessionStore};

/// Keeps the session in memory. Useful for tests and for embedding the
/// client in a long-running process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        self.session
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.write().map_err(|_| SessionError::Poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().map_err(|_| SessionError::Poisoned)? = None;
        Ok(())
    }
}
