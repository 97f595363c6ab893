//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the quend reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the awards table.
pub const CREATE_AWARDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS awards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        active INTEGER NOT NULL DEFAULT 1,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the operators table.
pub const CREATE_OPERATORS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS operators (
        callsign TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// The first UNIQUE constraint is the mutual-exclusion guarantee: one holder
/// per channel per award. The second backs the one-reservation-per-operator
/// rule. Both foreign keys cascade so that removing an award or an operator
/// removes its reservations in the same statement.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        award_id INTEGER NOT NULL REFERENCES awards(id) ON DELETE CASCADE,
        band TEXT NOT NULL,
        mode TEXT NOT NULL,
        operator_callsign TEXT NOT NULL REFERENCES operators(callsign) ON DELETE CASCADE,
        created_at INTEGER NOT NULL,
        UNIQUE (award_id, band, mode),
        UNIQUE (award_id, operator_callsign)
    )";

/// SQL statement to create the sessions table.
pub const CREATE_SESSIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        operator_callsign TEXT NOT NULL REFERENCES operators(callsign) ON DELETE CASCADE,
        started_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on the reservation holder.
///
/// Speeds up bulk release on logout, which crosses awards.
pub const CREATE_RESERVATION_OPERATOR_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_operator
    ON reservations(operator_callsign)";

/// SQL statement to create an index on the session owner.
pub const CREATE_SESSION_OPERATOR_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_sessions_operator
    ON sessions(operator_callsign)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for every reservation query, in `row_to_reservation` order.
pub const RESERVATION_COLUMNS: &str = "id, award_id, band, mode, operator_callsign, created_at";

/// SQL statement to insert a reservation.
///
/// Plain INSERT: a conflicting row must fail, never replace.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (award_id, band, mode, operator_callsign, created_at)
    VALUES (?, ?, ?, ?, ?)
";

/// SQL statement to delete a reservation by resource key.
pub const DELETE_RESERVATION_BY_KEY: &str = r"
    DELETE FROM reservations
    WHERE award_id = ? AND band = ? AND mode = ?
";
