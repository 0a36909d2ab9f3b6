//! Users and login sessions.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

use super::sqlite_store::{is_unique_violation, SqliteStore};
use crate::entity::{Session, User};
use crate::error::{NotesError, Result};

impl SqliteStore {
    /// Create a user from an already-hashed password
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        self.conn
            .execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                params![username, password_hash],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    NotesError::DuplicateUsername(username.to_string())
                } else {
                    e.into()
                }
            })?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE id = ?1",
                [id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE username = ?1",
                [username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Start a new session for `user_id` and return it.
    ///
    /// Expired sessions are purged on the way.
    pub fn create_session(&self, user_id: i64) -> Result<Session> {
        let now = Utc::now();
        self.purge_expired_sessions(now)?;

        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: now,
        };
        self.insert_session(&session)?;

        Ok(session)
    }

    fn insert_session(&self, session: &Session) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![session.token, session.user_id, timestamp(session.created_at)],
        )?;
        Ok(())
    }

    /// Resolve a session token to its user. Expired sessions resolve to `None`.
    pub fn session_user(&self, token: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT u.id, u.username, u.password_hash
                 FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token = ?1 AND s.created_at > ?2",
                params![token, timestamp(session_cutoff(Utc::now()))],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Drop every session that is expired at `now`, returning how many went
    pub fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let purged = self.conn.execute(
            "DELETE FROM sessions WHERE created_at <= ?1",
            [timestamp(session_cutoff(now))],
        )?;
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }
        Ok(purged)
    }

    /// End a session. Unknown tokens are ignored.
    pub fn delete_session(&self, token: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE token = ?1", [token])?;
        Ok(())
    }
}

/// Sessions created at or before this instant are expired at `now`
fn session_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(Session::MAX_AGE_SECS)
}

/// Fixed-width UTC timestamp, so stored values compare correctly as text
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
    })
}
