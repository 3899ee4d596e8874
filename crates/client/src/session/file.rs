//! Session record persisted as a single JSON file.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{Session, SessionError, SessionStore};

/// Stores the session as one JSON blob at a fixed path.
///
/// Each write goes to its own uniquely named temp file in the same directory,
/// which is then renamed over the record. Readers only ever see a complete
/// record or none, and concurrent writers resolve last-write-wins.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn remove(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable session record"
                );
                self.remove()?;
                Ok(None)
            }
        }
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        let dir = self.dir();
        std::fs::create_dir_all(dir)?;

        let encoded = serde_json::to_vec(session)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&encoded)?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.remove()
    }
}
