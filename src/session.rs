//! Session Store
//!
//! Persists the authenticated identity and bearer token in durable local
//! storage, plus the ledger of emails registered while offline. Two JSON
//! documents under one directory; reads and writes are synchronous.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File holding the current session.
const SESSION_FILE: &str = "session.json";

/// File holding the offline registration ledger.
const MOCK_EMAILS_FILE: &str = "mock_emails.json";

/// Account role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Farmer,
    Expert,
    Admin,
    Visitor,
}

impl Role {
    /// Parse the role names used by the backend and the CLI.
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_ascii_uppercase().as_str() {
            "FARMER" => Some(Role::Farmer),
            "EXPERT" => Some(Role::Expert),
            "ADMIN" => Some(Role::Admin),
            "VISITOR" => Some(Role::Visitor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Farmer => "FARMER",
            Role::Expert => "EXPERT",
            Role::Admin => "ADMIN",
            Role::Visitor => "VISITOR",
        };
        f.write_str(name)
    }
}

/// Profile of the signed-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl UserProfile {
    /// Display name used in greetings and listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The stored authentication state: bearer token plus user profile.
///
/// Created on successful login or registration (live or mocked), read on
/// every authenticated call, destroyed on logout. Presence is treated as
/// validity; no expiry is enforced client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Durable store for the session and the offline registration ledger.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| SessionError::Io {
            path: dir.clone(),
            error: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn ledger_path(&self) -> PathBuf {
        self.dir.join(MOCK_EMAILS_FILE)
    }

    /// Current session, or `None` when signed out.
    ///
    /// A corrupt session document is treated as signed out rather than an
    /// error, so a damaged file can never lock the user out.
    pub fn get(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(self.session_path()).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session document");
                None
            }
        }
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Option<String> {
        self.get().map(|s| s.token)
    }

    /// Persist `session` as the current identity.
    pub fn set(&self, session: &Session) -> Result<(), SessionError> {
        self.write_json(&self.session_path(), session)
    }

    /// Remove the stored session. Signing out twice is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io {
                path: self.session_path(),
                error: e.to_string(),
            }),
        }
    }

    /// Emails registered while the backend was unreachable.
    ///
    /// Missing or corrupt ledger reads as empty, matching the lazy
    /// creation of the ledger on first offline registration.
    pub fn mock_emails(&self) -> Vec<String> {
        let raw = match std::fs::read_to_string(self.ledger_path()) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    /// Record an offline registration. Returns `false` (and leaves the
    /// ledger untouched) when the email is already present.
    pub fn record_mock_email(&self, email: &str) -> Result<bool, SessionError> {
        let mut emails = self.mock_emails();
        if emails.iter().any(|e| e == email) {
            return Ok(false);
        }
        emails.push(email.to_string());
        self.write_json(&self.ledger_path(), &emails)?;
        Ok(true)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)?;
        std::fs::write(path, raw).map_err(|e| SessionError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

/// Errors from the durable session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to access session storage at {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to encode session data: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_session() -> Session {
        Session {
            token: "test-token".to_string(),
            user: UserProfile {
                id: 7,
                username: "asha@example.com".to_string(),
                email: "asha@example.com".to_string(),
                first_name: "Asha".to_string(),
                last_name: "Kale".to_string(),
                role: Role::Farmer,
            },
        }
    }

    #[test]
    fn set_get_clear_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        assert!(store.get().is_none());
        store.set(&sample_session()).unwrap();
        assert_eq!(store.get(), Some(sample_session()));
        assert_eq!(store.token().as_deref(), Some("test-token"));

        store.clear().unwrap();
        assert!(store.get().is_none());
        // Clearing again is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_reads_as_signed_out() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn ledger_deduplicates_emails() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        assert!(store.mock_emails().is_empty());
        assert!(store.record_mock_email("a@b.co").unwrap());
        assert!(!store.record_mock_email("a@b.co").unwrap());
        assert!(store.record_mock_email("c@d.co").unwrap());
        assert_eq!(store.mock_emails(), vec!["a@b.co", "c@d.co"]);
    }

    #[test]
    fn corrupt_ledger_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join(MOCK_EMAILS_FILE), "oops").unwrap();
        assert!(store.mock_emails().is_empty());
        assert!(store.record_mock_email("a@b.co").unwrap());
        assert_eq!(store.mock_emails(), vec!["a@b.co"]);
    }

    #[test]
    fn role_wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&Role::Farmer).unwrap();
        assert_eq!(json, "\"FARMER\"");
        let role: Role = serde_json::from_str("\"EXPERT\"").unwrap();
        assert_eq!(role, Role::Expert);
    }

    #[test]
    fn session_wire_format_is_camel_case() {
        let session = sample_session();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user"]["firstName"], "Asha");
        assert_eq!(json["user"]["role"], "FARMER");
    }
}
