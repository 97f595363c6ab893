//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_AWARDS_TABLE, CREATE_METADATA_TABLE, CREATE_OPERATORS_TABLE,
    CREATE_RESERVATIONS_TABLE, CREATE_RESERVATION_OPERATOR_INDEX, CREATE_SESSIONS_TABLE,
    CREATE_SESSION_OPERATOR_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database. Every
/// statement is idempotent, and the whole batch runs in one transaction so
/// two processes racing to initialize the same file cannot interleave.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use quend::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = create_all(conn);
    match result {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(_) => conn.execute_batch("ROLLBACK")?,
    }
    result
}

fn create_all(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_AWARDS_TABLE, [])?;
    conn.execute(CREATE_OPERATORS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_SESSIONS_TABLE, [])?;

    conn.execute(CREATE_RESERVATION_OPERATOR_INDEX, [])?;
    conn.execute(CREATE_SESSION_OPERATOR_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. A database written by a different
/// schema version is refused with [`Error::UnsupportedSchemaVersion`].
///
/// # Errors
///
/// Returns an error if the schema version is incompatible, initialization
/// fails, or a query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        log::debug!("initializing schema version {CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
