//! Session identity: the stored auth token and user profile.
//!
//! DESIGN
//! ======
//! Identity lives in persistent client storage under two well-known keys.
//! Storage access goes through `SessionStore` so the request pipeline and the
//! navigation guard share one explicit `Session` context, and tests can swap
//! in `MemoryStore`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";
/// Role string that unlocks admin-only routes.
pub const ADMIN_ROLE: &str = "admin";

/// Read/write/clear capability over string key-value storage.
///
/// Implementations swallow storage failures: a failed read is `None`, a
/// failed write or remove is a no-op.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Stored user profile. Only `role` is interpreted; everything else written
/// by the login flow is kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Parse a stored profile blob. Anything unparseable is an empty profile.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(raw) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("ignoring malformed stored user profile: {e}");
                Self::default()
            }
        }
    }

    pub fn with_role(role: impl Into<String>) -> Self {
        Self { role: Some(role.into()), extra: serde_json::Map::new() }
    }
}

/// Snapshot of who is signed in, as seen by the guard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Identity {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Shared session context handed to both the request pipeline and the guard.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("identity", &self.identity()).finish()
    }
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self { store: Rc::new(store) }
    }

    /// Stored bearer token. An empty string counts as no token.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::parse(self.store.get(USER_KEY).as_deref())
    }

    pub fn identity(&self) -> Identity {
        Identity { token: self.token(), role: self.profile().role }
    }

    /// Persist identity after a successful login.
    pub fn sign_in(&self, token: &str, profile: &UserProfile) {
        self.store.set(TOKEN_KEY, token);
        match serde_json::to_string(profile) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(e) => log::warn!("failed to serialize user profile: {e}"),
        }
    }

    /// Drop the stored token and profile.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}
