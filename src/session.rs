//! Locally stored authentication session.
//!
//! The session is a small JSON file holding the bearer token (and the
//! buyer id once known). It is the only state litshop keeps between runs.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{BearerToken, ClientError, UserId};

/// Default session file name, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = ".litshop-session.json";

/// Persisted session contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token returned by login.
    pub token: String,
    /// Account id, cached after the first `GET /auth/me`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// When the session was written.
    pub saved_at: DateTime<Utc>,
}

impl SessionState {
    /// Starts a session for `token`.
    #[must_use]
    pub fn new(token: &BearerToken) -> Self {
        Self {
            token: token.value().to_owned(),
            user_id: None,
            saved_at: Utc::now(),
        }
    }

    /// Returns the validated bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the stored token is blank.
    pub fn bearer(&self) -> Result<BearerToken, ClientError> {
        BearerToken::new(&self.token)
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    path: Utf8PathBuf,
}

impl SessionStore {
    /// Creates a store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Loads the session. A missing file, or one holding a blank token,
    /// means no session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] when the file exists but cannot be read
    /// or parsed.
    pub fn load(&self) -> Result<Option<SessionState>, ClientError> {
        let (dir, file_name) = self.open()?;
        let content = match dir.read_to_string(file_name) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(ClientError::Io {
                    message: format!("failed to read session file '{}': {error}", self.path),
                });
            }
        };

        let state: SessionState =
            serde_json::from_str(&content).map_err(|error| ClientError::Io {
                message: format!("failed to parse session file '{}': {error}", self.path),
            })?;
        Ok(state.bearer().is_ok().then_some(state))
    }

    /// Writes the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] for a blank token and
    /// [`ClientError::Io`] when the file cannot be written.
    pub fn save(&self, state: &SessionState) -> Result<(), ClientError> {
        state.bearer()?;
        let (dir, file_name) = self.open()?;
        let json = serde_json::to_string_pretty(state).map_err(|error| ClientError::Io {
            message: format!("failed to serialise session: {error}"),
        })?;
        dir.write(file_name, json).map_err(|error| ClientError::Io {
            message: format!("failed to write session file '{}': {error}", self.path),
        })?;
        debug!(path = %self.path, "session saved");
        Ok(())
    }

    /// Removes the session file. Clearing an absent session succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] when the file exists but cannot be
    /// removed.
    pub fn clear(&self) -> Result<(), ClientError> {
        let (dir, file_name) = self.open()?;
        match dir.remove_file(file_name) {
            Ok(()) => {
                debug!(path = %self.path, "session cleared");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::Io {
                message: format!("failed to remove session file '{}': {error}", self.path),
            }),
        }
    }

    fn open(&self) -> Result<(Dir, &str), ClientError> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = self.path.file_name().ok_or_else(|| ClientError::Io {
            message: format!("invalid session path '{}': no file name", self.path),
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
            ClientError::Io {
                message: format!("failed to open session directory '{parent}': {error}"),
            }
        })?;
        Ok((dir, file_name))
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{SessionState, SessionStore};
    use crate::api::{BearerToken, ClientError, UserId};

    struct StoreFixture {
        _temp_dir: TempDir,
        base: Utf8PathBuf,
        store: SessionStore,
    }

    #[fixture]
    fn fixture() -> StoreFixture {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let base = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("temp directory path must be UTF-8");
        let store = SessionStore::new(base.join("session.json"));
        StoreFixture {
            _temp_dir: temp_dir,
            base,
            store,
        }
    }

    fn token() -> BearerToken {
        BearerToken::new("abc123").expect("token should be valid")
    }

    #[rstest]
    fn missing_file_is_no_session(fixture: StoreFixture) {
        assert_eq!(fixture.store.load(), Ok(None));
    }

    #[rstest]
    fn saved_session_loads_back(fixture: StoreFixture) {
        let mut state = SessionState::new(&token());
        state.user_id = Some(UserId::new("u-7"));
        fixture.store.save(&state).expect("session should save");

        let loaded = fixture.store.load().expect("session should load");
        assert_eq!(loaded, Some(state));
    }

    #[rstest]
    fn clear_removes_session_and_is_idempotent(fixture: StoreFixture) {
        fixture
            .store
            .save(&SessionState::new(&token()))
            .expect("session should save");
        fixture.store.clear().expect("first clear should succeed");
        fixture.store.clear().expect("second clear should succeed");
        assert_eq!(fixture.store.load(), Ok(None));
    }

    #[rstest]
    fn blank_token_is_not_saved(fixture: StoreFixture) {
        let mut state = SessionState::new(&token());
        state.token = "  ".to_owned();
        assert_eq!(fixture.store.save(&state), Err(ClientError::MissingToken));
    }

    #[rstest]
    fn corrupt_file_is_an_io_error(fixture: StoreFixture) {
        std::fs::write(fixture.base.join("session.json"), "not json")
            .expect("fixture file should be written");
        assert!(matches!(
            fixture.store.load(),
            Err(ClientError::Io { .. })
        ));
    }
}
