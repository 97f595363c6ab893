//! Database layer for persistent storage of awards, operators, sessions and
//! band/mode reservations.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, and the store operations the reservation
//! manager composes into transactions.
//!
//! # Examples
//!
//! ```no_run
//! use quend::database::{Database, DatabaseConfig};
//! use quend::{Callsign, ResourceCatalog};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/quend.db")).unwrap();
//!
//! let call = Callsign::parse("EA1AAA").unwrap();
//! let channel = ResourceCatalog::default().normalize("20m", "CW").unwrap();
//!
//! let reservation = db
//!     .in_immediate_transaction(|tx| {
//!         let award = Database::insert_award(tx, "EG90IARU", "")?;
//!         Database::insert_operator(tx, &call, "Alice", false)?;
//!         Database::try_create(tx, award.id, &channel, &call)
//!     })
//!     .unwrap();
//! println!("{reservation:?}");
//! ```

mod config;
mod connection;
mod directory;
pub mod migrations;
mod operations;
mod schema;
mod sessions;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use sessions::SessionId;
