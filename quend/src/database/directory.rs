//! Award and operator directory tables.
//!
//! These back the award-management and operator collaborators. Deleting a
//! row here cascades to the reservations that reference it.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::award::{clean_award_name, Award, AwardId};
use crate::error::{is_unique_violation, Error, Result};
use crate::operator::{clean_display_name, Callsign, Operator};

use super::connection::Database;
use super::operations::{callsign_column, systemtime_to_unix_secs, unix_secs_to_systemtime};

const AWARD_COLUMNS: &str = "id, name, description, active, created_at";
const OPERATOR_COLUMNS: &str = "callsign, name, is_admin, created_at";

fn row_to_award(row: &rusqlite::Row<'_>) -> rusqlite::Result<Award> {
    Ok(Award {
        id: AwardId::new(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        active: row.get(3)?,
        created_at: unix_secs_to_systemtime(row.get(4)?),
    })
}

fn row_to_operator(row: &rusqlite::Row<'_>) -> rusqlite::Result<Operator> {
    Ok(Operator {
        callsign: callsign_column(row, 0)?,
        name: row.get(1)?,
        is_admin: row.get(2)?,
        created_at: unix_secs_to_systemtime(row.get(3)?),
    })
}

impl Database {
    /// Inserts a new, active award.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or already taken.
    pub fn insert_award(conn: &Connection, name: &str, description: &str) -> Result<Award> {
        let name = clean_award_name(name)?;
        let created_at = SystemTime::now();
        let created_secs = systemtime_to_unix_secs(created_at)?;

        match conn.execute(
            "INSERT INTO awards (name, description, active, created_at) VALUES (?, ?, 1, ?)",
            params![name, description.trim(), created_secs],
        ) {
            Ok(_) => Ok(Award {
                id: AwardId::new(conn.last_insert_rowid()),
                name,
                description: description.trim().to_string(),
                active: true,
                created_at: unix_secs_to_systemtime(created_secs),
            }),
            Err(e) if is_unique_violation(&e) => Err(Error::Validation {
                field: "name".into(),
                message: format!("an award named '{name}' already exists"),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves an award by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_award(conn: &Connection, award_id: AwardId) -> Result<Option<Award>> {
        let sql = format!("SELECT {AWARD_COLUMNS} FROM awards WHERE id = ?");
        Ok(conn
            .query_row(&sql, params![award_id.value()], row_to_award)
            .optional()?)
    }

    /// Retrieves an award by name (exact, after trimming).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_award_by_name(conn: &Connection, name: &str) -> Result<Option<Award>> {
        let sql = format!("SELECT {AWARD_COLUMNS} FROM awards WHERE name = ?");
        Ok(conn
            .query_row(&sql, params![name.trim()], row_to_award)
            .optional()?)
    }

    /// Lists all awards ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_awards(conn: &Connection) -> Result<Vec<Award>> {
        let sql = format!("SELECT {AWARD_COLUMNS} FROM awards ORDER BY name");
        let mut stmt = conn.prepare(&sql)?;
        let awards = stmt
            .query_map([], row_to_award)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(awards)
    }

    /// Sets the active flag. Returns `false` if the award does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_award_active(conn: &Connection, award_id: AwardId, active: bool) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE awards SET active = ? WHERE id = ?",
            params![active, award_id.value()],
        )?;
        Ok(rows > 0)
    }

    /// Replaces an award's name and description.
    ///
    /// Returns `false` if the award does not exist.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or taken by another
    /// award.
    pub fn update_award_details(
        conn: &Connection,
        award_id: AwardId,
        name: &str,
        description: &str,
    ) -> Result<bool> {
        let name = clean_award_name(name)?;
        match conn.execute(
            "UPDATE awards SET name = ?, description = ? WHERE id = ?",
            params![name, description.trim(), award_id.value()],
        ) {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_unique_violation(&e) => Err(Error::Validation {
                field: "name".into(),
                message: format!("an award named '{name}' already exists"),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an award and, through the cascade, its reservations.
    ///
    /// Returns `false` if the award does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_award_row(conn: &Connection, award_id: AwardId) -> Result<bool> {
        let rows = conn.execute("DELETE FROM awards WHERE id = ?", params![award_id.value()])?;
        Ok(rows > 0)
    }

    /// Counts awards and, of those, active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_awards(conn: &Connection) -> Result<(usize, usize)> {
        let (total, active): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(active), 0) FROM awards",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        Ok((
            usize::try_from(total).unwrap_or_default(),
            usize::try_from(active).unwrap_or_default(),
        ))
    }

    /// Inserts a new operator.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the display name is blank or the
    /// callsign is already registered.
    pub fn insert_operator(
        conn: &Connection,
        callsign: &Callsign,
        name: &str,
        is_admin: bool,
    ) -> Result<Operator> {
        let name = clean_display_name(name)?;
        let created_secs = systemtime_to_unix_secs(SystemTime::now())?;

        match conn.execute(
            "INSERT INTO operators (callsign, name, is_admin, created_at) VALUES (?, ?, ?, ?)",
            params![callsign.as_str(), name, is_admin, created_secs],
        ) {
            Ok(_) => Ok(Operator {
                callsign: callsign.clone(),
                name,
                is_admin,
                created_at: unix_secs_to_systemtime(created_secs),
            }),
            Err(e) if is_unique_violation(&e) => Err(Error::Validation {
                field: "callsign".into(),
                message: format!("{callsign} is already registered"),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves an operator by callsign.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator(conn: &Connection, callsign: &Callsign) -> Result<Option<Operator>> {
        let sql = format!("SELECT {OPERATOR_COLUMNS} FROM operators WHERE callsign = ?");
        Ok(conn
            .query_row(&sql, params![callsign.as_str()], row_to_operator)
            .optional()?)
    }

    /// Lists all operators ordered by callsign.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_operators(conn: &Connection) -> Result<Vec<Operator>> {
        let sql = format!("SELECT {OPERATOR_COLUMNS} FROM operators ORDER BY callsign");
        let mut stmt = conn.prepare(&sql)?;
        let operators = stmt
            .query_map([], row_to_operator)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(operators)
    }

    /// Sets the admin flag. Returns `false` if the operator does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_operator_admin(
        conn: &Connection,
        callsign: &Callsign,
        is_admin: bool,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE operators SET is_admin = ? WHERE callsign = ?",
            params![is_admin, callsign.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Deletes an operator row. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_operator_row(conn: &Connection, callsign: &Callsign) -> Result<bool> {
        let rows = conn.execute(
            "DELETE FROM operators WHERE callsign = ?",
            params![callsign.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Counts registered operators and, of those, admins.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_operators(conn: &Connection) -> Result<(usize, usize)> {
        let (total, admins): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_admin), 0) FROM operators",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        Ok((
            usize::try_from(total).unwrap_or_default(),
            usize::try_from(admins).unwrap_or_default(),
        ))
    }
}
