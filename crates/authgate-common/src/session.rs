//! The one-slot session store.
//!
//! Browser storage is a string key-value space shared by every page.
//! [`SessionRepository`] owns the three keys the login flow writes and
//! exposes them as a single [`Session`] so invalidation happens in one
//! place.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

use crate::models::{LoginResponse, SessionToken, UserRecord};

/// Raw session token.
pub const TOKEN_KEY: &str = "token";
/// Raw user id string.
pub const USER_ID_KEY: &str = "user_id";
/// JSON-serialized [`UserRecord`].
pub const USER_KEY: &str = "user";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage write failed for `{key}`: {reason}")]
    Write { key: &'static str, reason: String },
    #[error("user record could not be serialized: {0}")]
    Encode(#[from] serde_json::Error),
}

// ── Storage seam ────────────────────────────────────────────────────

/// String-valued key-value storage (localStorage in the browser).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &'static str, value: &str) -> Result<(), SessionError>;
    fn delete(&self, key: &str);
}

/// In-process storage. Clones share the same map, so a test can keep a
/// handle while the repository owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.borrow().entries.clone()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    fn set(&self, key: &'static str, value: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.borrow_mut();
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.inner.borrow_mut().entries.remove(key);
    }
}

// ── Session ─────────────────────────────────────────────────────────

/// What a successful login leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: Option<String>,
    /// Copy cached at login time. Never treated as authoritative.
    pub user: Option<UserRecord>,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            user_id: Some(resp.user.id.to_string()),
            user: Some(resp.user),
        }
    }
}

/// Repository interface over the session slot.
pub trait SessionStore {
    /// Overwrite the slot with `session`.
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    /// Read the slot. `None` when no token is stored.
    fn load(&self) -> Option<Session>;
    /// Remove every session key.
    fn clear(&self);
}

/// [`SessionStore`] over any [`KeyValueStorage`].
#[derive(Debug, Clone, Default)]
pub struct SessionRepository<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write(&self, session: &Session, user_json: Option<&str>) -> Result<(), SessionError> {
        self.storage.set(TOKEN_KEY, session.token.as_str())?;
        match &session.user_id {
            Some(id) => self.storage.set(USER_ID_KEY, id)?,
            None => self.storage.delete(USER_ID_KEY),
        }
        match user_json {
            Some(json) => self.storage.set(USER_KEY, json)?,
            None => self.storage.delete(USER_KEY),
        }
        Ok(())
    }
}

impl<S: KeyValueStorage> SessionStore for SessionRepository<S> {
    fn save(&self, session: &Session) -> Result<(), SessionError> {
        // Encode before touching storage; a failed write empties the slot.
        let user_json = session
            .user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.write(session, user_json.as_deref()).inspect_err(|e| {
            log::warn!("Session write failed, clearing slot: {e}");
            self.clear();
        })
    }

    fn load(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("Ignoring unreadable cached user record: {e}");
                    None
                }
            });
        Some(Session {
            token: SessionToken::new(token),
            user_id: self.storage.get(USER_ID_KEY),
            user,
        })
    }

    fn clear(&self) {
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(USER_ID_KEY);
        self.storage.delete(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn sample_session() -> Session {
        Session {
            token: SessionToken::new("tok-1"),
            user_id: Some("42".into()),
            user: Some(UserRecord {
                id: UserId::Number(42),
                email: "ada@example.com".into(),
                is_active: true,
                extra: Default::default(),
            }),
        }
    }

    #[test]
    fn save_writes_three_raw_keys() {
        let storage = MemoryStorage::new();
        let repo = SessionRepository::new(storage.clone());
        repo.save(&sample_session()).unwrap();

        let snap = storage.snapshot();
        assert_eq!(snap.get(TOKEN_KEY).map(String::as_str), Some("tok-1"));
        assert_eq!(snap.get(USER_ID_KEY).map(String::as_str), Some("42"));
        let user: serde_json::Value = serde_json::from_str(&snap[USER_KEY]).unwrap();
        assert_eq!(user["email"], "ada@example.com");
        assert_eq!(storage.writes(), 3);
    }

    #[test]
    fn load_round_trips_saved_session() {
        let repo = SessionRepository::new(MemoryStorage::new());
        repo.save(&sample_session()).unwrap();
        assert_eq!(repo.load(), Some(sample_session()));
    }

    #[test]
    fn load_without_token_is_none() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "42").unwrap();
        let repo = SessionRepository::new(storage);
        assert!(repo.load().is_none());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "").unwrap();
        assert!(SessionRepository::new(storage).load().is_none());
    }

    #[test]
    fn corrupt_user_record_still_yields_token() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();
        let session = SessionRepository::new(storage).load().unwrap();
        assert_eq!(session.token.as_str(), "tok");
        assert!(session.user.is_none());
    }

    #[test]
    fn clear_removes_every_key() {
        let storage = MemoryStorage::new();
        let repo = SessionRepository::new(storage.clone());
        repo.save(&sample_session()).unwrap();
        repo.clear();
        assert!(storage.snapshot().is_empty());
        assert!(repo.load().is_none());
    }

    #[test]
    fn save_overwrites_previous_session() {
        let storage = MemoryStorage::new();
        let repo = SessionRepository::new(storage.clone());
        repo.save(&sample_session()).unwrap();
        let mut next = sample_session();
        next.token = SessionToken::new("tok-2");
        repo.save(&next).unwrap();
        assert_eq!(storage.snapshot().len(), 3);
        assert_eq!(repo.load().unwrap().token.as_str(), "tok-2");
    }

    /// Memory storage that refuses writes to one key.
    struct RefusingStorage {
        inner: MemoryStorage,
        refused: &'static str,
    }

    impl KeyValueStorage for RefusingStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &'static str, value: &str) -> Result<(), SessionError> {
            if key == self.refused {
                return Err(SessionError::Write {
                    key,
                    reason: "quota exceeded".into(),
                });
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) {
            self.inner.delete(key);
        }
    }

    #[test]
    fn failed_write_leaves_no_mixed_session() {
        let inner = MemoryStorage::new();
        SessionRepository::new(inner.clone())
            .save(&sample_session())
            .unwrap();

        let repo = SessionRepository::new(RefusingStorage {
            inner: inner.clone(),
            refused: USER_KEY,
        });
        let mut next = sample_session();
        next.token = SessionToken::new("tok-2");
        let err = repo.save(&next).unwrap_err();

        assert!(matches!(err, SessionError::Write { key: USER_KEY, .. }));
        assert!(inner.snapshot().is_empty());
        assert!(repo.load().is_none());
    }
}
