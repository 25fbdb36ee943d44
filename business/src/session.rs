//! Who is logged in.
//!
//! A [`Session`] is created by [`crate::api::auth::login`] and handed explicitly
//! to whatever needs it. Persisting it between runs is the job of a
//! [`SessionStore`].

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user role.")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "parent" => Ok(Self::Parent),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend id of the user (parent id for parents).
    pub id: String,
    pub role: Role,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Session {
    /// The stored name, or one derived from the email's local part.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => name_from_email(&self.email),
        }
    }
}

/// `jane.doe_k@school.org` becomes `Jane doe k`.
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let spaced = local.replace(['.', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

/// Read/save/clear contract for the current session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Process-local store, for tests and one-shot use.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, SessionStoreError> {
        self.session
            .lock()
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot()? = None;
        Ok(())
    }
}
