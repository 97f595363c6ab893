//! Session rows.
//!
//! A session row exists from login until its end is reported. Deleting the
//! row is what makes the end notification exactly-once.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::operator::Callsign;

use super::connection::Database;
use super::operations::{callsign_column, systemtime_to_unix_secs};

/// Store-assigned session identifier.
pub type SessionId = i64;

impl Database {
    /// Records a new session for an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a foreign-key failure
    /// for an unregistered operator.
    pub fn insert_session(conn: &Connection, operator: &Callsign) -> Result<SessionId> {
        let started = systemtime_to_unix_secs(SystemTime::now())?;
        conn.execute(
            "INSERT INTO sessions (operator_callsign, started_at) VALUES (?, ?)",
            params![operator.as_str(), started],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Returns the operator that owns a session, if the session is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn session_operator(conn: &Connection, session: SessionId) -> Result<Option<Callsign>> {
        Ok(conn
            .query_row(
                "SELECT operator_callsign FROM sessions WHERE id = ?",
                params![session],
                |row| callsign_column(row, 0),
            )
            .optional()?)
    }

    /// Deletes a session row. Returns `false` if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(conn: &Connection, session: SessionId) -> Result<bool> {
        let rows = conn.execute("DELETE FROM sessions WHERE id = ?", params![session])?;
        Ok(rows > 0)
    }

    /// Deletes every open session of an operator and returns how many.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_operator(conn: &Connection, operator: &Callsign) -> Result<usize> {
        Ok(conn.execute(
            "DELETE FROM sessions WHERE operator_callsign = ?",
            params![operator.as_str()],
        )?)
    }

    /// Counts open sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_sessions(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |r| r.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
