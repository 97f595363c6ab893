//! Common test utilities for integration tests.
//!
//! A [`Station`] is one shared database file in a temporary directory.
//! Every call to [`Station::manager`] opens a fresh connection to it, the
//! way separate processes would.

use std::path::PathBuf;
use std::time::Duration;

use quend::{
    AwardId, Callsign, Database, DatabaseConfig, Identity, ReservationManager, ResourceCatalog,
};
use tempfile::TempDir;

/// A temporary shared database with an admin already registered.
#[allow(dead_code)]
pub struct Station {
    _dir: TempDir,
    path: PathBuf,
    pub admin: Identity,
}

#[allow(dead_code)]
impl Station {
    /// Creates the database and registers `EA1ADM` as admin.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quend.db");
        let admin = Identity::admin(Callsign::parse("EA1ADM").unwrap());

        let station = Self {
            _dir: dir,
            path,
            admin,
        };
        station
            .manager()
            .register_operator(&station.admin.callsign, "Admin", true)
            .unwrap();
        station
    }

    /// Path of the shared database file.
    pub fn db_path(&self) -> &PathBuf {
        &self.path
    }

    /// Opens a new connection with the default catalog.
    pub fn manager(&self) -> ReservationManager {
        self.manager_with(ResourceCatalog::default())
    }

    /// Opens a new connection with a specific catalog.
    pub fn manager_with(&self, catalog: ResourceCatalog) -> ReservationManager {
        let config =
            DatabaseConfig::new(&self.path).with_busy_timeout(Duration::from_secs(10));
        ReservationManager::new(Database::open(config).unwrap(), catalog)
    }

    /// Creates an active award.
    pub fn award(&self, name: &str) -> AwardId {
        self.manager()
            .create_award(&self.admin, name, "")
            .unwrap()
            .id
    }

    /// Registers a non-admin operator and returns their identity.
    pub fn operator(&self, callsign: &str, name: &str) -> Identity {
        let callsign = Callsign::parse(callsign).unwrap();
        self.manager()
            .register_operator(&callsign, name, false)
            .unwrap();
        Identity::operator(callsign)
    }
}
