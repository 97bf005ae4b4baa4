//! User accounts and per-email login attempt counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user account.
pub type UserId = Uuid;

/// A login account. Administrators manage the league; players only read.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Never serialized to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: String, is_admin: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash,
            is_admin,
            is_active: true,
            must_change_password: true,
            created_at: now,
        }
    }
}

/// Failed login counter for one email address.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub attempts_count: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    /// Set once too many failures happened; logins are refused until then.
    pub locked_until: Option<DateTime<Utc>>,
}

impl LoginAttempt {
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}
