//! On-disk session storage.
//!
//! The logged-in session lives in `$XDG_CONFIG_HOME/brightpath/session.toml`
//! (or the platform equivalent). `BRIGHTPATH_SESSION_FILE` points it
//! elsewhere.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use brightpath_business::{Session, SessionStore, SessionStoreError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Overrides the session file location.
pub const SESSION_FILE_ENV: &str = "BRIGHTPATH_SESSION_FILE";

/// Contents of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<Session>,
}

/// [`SessionStore`] backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The env override if set, else the platform config directory.
    pub fn default_location() -> Result<Self> {
        if let Some(path) = std::env::var_os(SESSION_FILE_ENV) {
            return Ok(Self::new(path));
        }
        let project_dirs = ProjectDirs::from("org", "brightpath", "brightpath")
            .context("Failed to determine config directory")?;
        Ok(Self::new(project_dirs.config_dir().join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SessionFile, SessionStoreError> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }

    fn write(&self, file: &SessionFile) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(file).map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.read()?.session)
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.write(&SessionFile {
            session: Some(session.clone()),
        })
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
