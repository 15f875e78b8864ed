//! Durable client storage
//!
//! One YAML state file playing the role a browser's localStorage plays for
//! the web client: the issued token, the user echo from the backend, and the
//! last role picked in the registration wizard. Everything in here is a
//! cache of backend state; a missing or unreadable file degrades to empty.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("could not determine a data directory for client state")]
    #[diagnostic(code(bmv::store::no_data_dir))]
    NoDataDir,

    #[error("failed to encode client state")]
    #[diagnostic(code(bmv::store::encode))]
    Encode(#[from] serde_yml::Error),

    #[error("failed to write client state to {path}")]
    #[diagnostic(code(bmv::store::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// User record echoed by the backend on login/registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u32>,
}

/// Serialized form of the state file
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ClientState {
    token: Option<String>,
    user: Option<StoredUser>,
    last_role: Option<String>,
}

/// Durable key-value client state backed by a single YAML file
#[derive(Debug)]
pub struct ClientStore {
    path: PathBuf,
    state: ClientState,
}

impl ClientStore {
    /// Open the store at the default location.
    ///
    /// `BMV_STATE_DIR` overrides the directory (used by tests and scripts);
    /// otherwise the platform data dir is used.
    pub fn open() -> Result<Self, StoreError> {
        let dir = match std::env::var_os("BMV_STATE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => directories::ProjectDirs::from("", "", "bmv")
                .ok_or(StoreError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };
        Ok(Self::at_path(dir.join("state.yaml")))
    }

    /// Open the store at an explicit path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_yml::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, state }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn user(&self) -> Option<&StoredUser> {
        self.state.user.as_ref()
    }

    pub fn last_role(&self) -> Option<&str> {
        self.state.last_role.as_deref()
    }

    /// Persist an issued token and the user it belongs to
    pub fn set_session(&mut self, token: String, user: StoredUser) -> Result<(), StoreError> {
        self.state.token = Some(token);
        self.state.user = Some(user);
        self.persist()
    }

    /// Drop the token and user, keeping the last selected role
    pub fn clear_session(&mut self) -> Result<(), StoreError> {
        self.state.token = None;
        self.state.user = None;
        self.persist()
    }

    /// Persist the last role picked in the registration wizard
    pub fn set_last_role(&mut self, role: &str) -> Result<(), StoreError> {
        self.state.last_role = Some(role.to_string());
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let write = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write)?;
        }
        let contents = serde_yml::to_string(&self.state)?;
        std::fs::write(&self.path, contents).map_err(write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> ClientStore {
        ClientStore::at_path(tmp.path().join("state.yaml"))
    }

    #[test]
    fn test_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(store.last_role().is_none());
    }

    #[test]
    fn test_session_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        store
            .set_session(
                "jwt-token".into(),
                StoredUser {
                    id: Some("42".into()),
                    username: "Priya Shah".into(),
                    email: Some("priya@example.com".into()),
                    role: Some("vendor".into()),
                    role_id: Some(3),
                },
            )
            .unwrap();

        let reopened = store_in(&tmp);
        assert_eq!(reopened.token(), Some("jwt-token"));
        assert_eq!(reopened.user().unwrap().username, "Priya Shah");
        assert_eq!(reopened.user().unwrap().role_id, Some(3));
    }

    #[test]
    fn test_clear_session_keeps_last_role() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        store.set_last_role("vendor").unwrap();
        store
            .set_session(
                "jwt".into(),
                StoredUser {
                    id: None,
                    username: "x".into(),
                    email: None,
                    role: None,
                    role_id: None,
                },
            )
            .unwrap();
        store.clear_session().unwrap();

        let reopened = store_in(&tmp);
        assert!(reopened.token().is_none());
        assert!(reopened.user().is_none());
        assert_eq!(reopened.last_role(), Some("vendor"));
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.yaml");
        std::fs::write(&path, ": not : valid : yaml : [").unwrap();
        let store = ClientStore::at_path(&path);
        assert!(store.token().is_none());
    }
}
