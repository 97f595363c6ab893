//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::award::AwardId;
use crate::database::{Database, DatabaseConfig};
use crate::operator::Callsign;
use crate::resource::{Channel, ResourceCatalog};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts an active award and returns its id.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_award(db: &Database, name: &str) -> AwardId {
    Database::insert_award(db.connection(), name, "").unwrap().id
}

/// Registers a non-admin operator and returns the callsign.
///
/// # Panics
///
/// Panics if the callsign is invalid or the insert fails.
pub fn seed_operator(db: &Database, callsign: &str, name: &str) -> Callsign {
    let callsign = Callsign::parse(callsign).unwrap();
    Database::insert_operator(db.connection(), &callsign, name, false).unwrap();
    callsign
}

/// Normalizes a band/mode pair against the default catalog.
///
/// # Panics
///
/// Panics if the pair is not in the default catalog.
#[must_use]
pub fn channel(band: &str, mode: &str) -> Channel {
    ResourceCatalog::default().normalize(band, mode).unwrap()
}
