//! Session record and token lifecycle.
//!
//! Exactly one session exists per store. It is created on sign-in, its
//! access token is replaced on refresh, and it is deleted on logout, when
//! found expired, or when a refresh fails. Writes always replace the whole
//! record, so concurrent writers resolve last-write-wins.
//!
//! Storage is behind [`SessionStore`] so the medium is swappable:
//! [`FileSessionStore`] persists a single JSON blob, [`MemorySessionStore`]
//! keeps it in-process.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use std::fmt;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::AuthError;

/// Lifetime of a session, counted from sign-in.
pub const SESSION_TTL_MS: i64 = 60 * 60 * 1000;

/// Errors raised by a [`SessionStore`] backend.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session could not be encoded.
    #[error("session encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A thread panicked while holding the in-memory lock.
    #[error("session store lock poisoned")]
    Poisoned,
}

/// The signed-in user, as reported at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
}

/// The locally persisted proof of sign-in.
///
/// Implements `Debug` manually to redact both tokens.
#[derive(Clone)]
pub struct Session {
    access: SecretString,
    refresh: SecretString,
    pub user: SessionUser,
    /// Epoch milliseconds after which `access` must not be trusted.
    pub expires_at: i64,
}

impl Session {
    /// Create a session from its parts.
    #[must_use]
    pub const fn new(
        access: SecretString,
        refresh: SecretString,
        user: SessionUser,
        expires_at: i64,
    ) -> Self {
        Self {
            access,
            refresh,
            user,
            expires_at,
        }
    }

    /// Create a session issued at `issued_at_ms`, valid for [`SESSION_TTL_MS`].
    #[must_use]
    pub const fn issue(
        access: SecretString,
        refresh: SecretString,
        user: SessionUser,
        issued_at_ms: i64,
    ) -> Self {
        Self::new(access, refresh, user, issued_at_ms + SESSION_TTL_MS)
    }

    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access
    }

    #[must_use]
    pub const fn refresh_token(&self) -> &SecretString {
        &self.refresh
    }

    /// Copy of this session with a new access token. Expiry is unchanged.
    #[must_use]
    pub fn with_access(&self, access: SecretString) -> Self {
        Self {
            access,
            ..self.clone()
        }
    }

    /// Whether the session has expired at `now_ms`.
    #[must_use]
    pub const fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_ms())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// On-disk shape of a session record.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    access: String,
    refresh: String,
    user: SessionUser,
    expires_at: i64,
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StoredSession {
            access: self.access.expose_secret().to_owned(),
            refresh: self.refresh.expose_secret().to_owned(),
            user: self.user.clone(),
            expires_at: self.expires_at,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredSession::deserialize(deserializer)?;
        // A record is either absent or complete.
        if stored.access.is_empty() || stored.refresh.is_empty() {
            return Err(serde::de::Error::custom("session record is missing a token"));
        }
        Ok(Self {
            access: SecretString::from(stored.access),
            refresh: SecretString::from(stored.refresh),
            user: stored.user,
            expires_at: stored.expires_at,
        })
    }
}

/// Storage for the single session record.
pub trait SessionStore: Send + Sync {
    /// Read the current record. A record that cannot be decoded is treated
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing medium cannot be read.
    fn get(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing medium cannot be written.
    fn set(&self, session: &Session) -> Result<(), SessionError>;

    /// Delete the record. Deleting an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing medium cannot be written.
    fn clear(&self) -> Result<(), SessionError>;

    /// Whether a record is present and not yet expired.
    fn is_valid(&self) -> bool {
        matches!(self.get(), Ok(Some(session)) if !session.is_expired())
    }
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Delete the session if it has expired. Run once at startup.
///
/// Returns `true` if a record was removed. Does not redirect; the next
/// guarded navigation notices the absence.
///
/// # Errors
///
/// Returns `SessionError` if the store cannot be read or written.
pub fn sweep_expired(store: &dyn SessionStore) -> Result<bool, SessionError> {
    match store.get()? {
        Some(session) if session.is_expired() => {
            tracing::info!(
                expires_at = session.expires_at,
                "Removing expired session"
            );
            store.clear()?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// The access token to attach to the next request.
///
/// Never attempts renewal.
///
/// # Errors
///
/// Returns `AuthError::NoSession` if there is no record,
/// `AuthError::SessionExpired` if it has expired, and
/// `AuthError::Storage` if the store cannot be read.
pub fn access_token(store: &dyn SessionStore) -> Result<SecretString, AuthError> {
    let session = store
        .get()
        .map_err(AuthError::Storage)?
        .ok_or(AuthError::NoSession)?;

    if session.is_expired() {
        return Err(AuthError::SessionExpired);
    }

    Ok(session.access.clone())
}
