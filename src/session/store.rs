//! Session records and storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime (30 days).
const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Profile of a signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: String,
    user: SessionUser,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn new(id: String, user: SessionUser, max_age: Duration) -> Self {
        let now = Utc::now();
        let max_age = chrono::Duration::from_std(max_age).unwrap_or(chrono::Duration::MAX);
        Self {
            id,
            user,
            created_at: now,
            expires_at: now.checked_add_signed(max_age).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Session token.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Display name, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .or(self.user.email.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe store for live sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    max_age: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_SESSION_MAX_AGE)
    }

    /// Create a store whose sessions expire after `max_age`.
    #[must_use]
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                max_age,
            }),
        }
    }

    /// Create a session for `user` and return it.
    pub fn create(&self, user: SessionUser) -> Session {
        let id = Uuid::new_v4().simple().to_string();
        let session = Session::new(id.clone(), user, self.inner.max_age);
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        session
    }

    /// Get a live session by token. Expired sessions are evicted.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        let session = {
            let guard = self
                .inner
                .sessions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            guard.get(id).cloned()?
        };

        if session.is_expired(Utc::now()) {
            self.remove(id);
            return None;
        }
        Some(session)
    }

    /// Remove a session. Returns the removed session, if any.
    pub fn remove(&self, id: &str) -> Option<Session> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
