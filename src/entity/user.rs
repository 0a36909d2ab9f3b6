// src/entity/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Check a plaintext password against the stored bcrypt hash.
    ///
    /// A malformed hash counts as a mismatch.
    pub fn check_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// A login session, identified by the token stored in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Two weeks, after which the session stops authenticating
    pub const MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;
}
