//! Award and operator management.
//!
//! Changes to awards and to admin flags require the admin capability.
//! Operator registration does not: deciding who may register is the auth
//! collaborator's job.

use crate::award::{Award, AwardId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::operator::{Callsign, Identity, Operator};

use super::{require_award, ReservationManager};

impl ReservationManager {
    /// Creates a new, active award.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and a validation error
    /// if the name is blank or taken.
    pub fn create_award(
        &mut self,
        identity: &Identity,
        name: &str,
        description: &str,
    ) -> Result<Award> {
        identity.require_admin("create awards")?;
        let award = self
            .db
            .in_immediate_transaction(|tx| Database::insert_award(tx, name, description))?;
        log::info!("{} created award {} ({})", identity.callsign, award.name, award.id);
        Ok(award)
    }

    /// Sets whether an award accepts new reservations.
    ///
    /// Existing reservations are left in place either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] for an unknown award.
    pub fn set_award_active(
        &mut self,
        identity: &Identity,
        award_id: AwardId,
        active: bool,
    ) -> Result<()> {
        identity.require_admin("change award status")?;
        let updated = self
            .db
            .in_immediate_transaction(|tx| Database::update_award_active(tx, award_id, active))?;
        if !updated {
            return Err(award_not_found(award_id));
        }
        log::info!(
            "{} {} award {award_id}",
            identity.callsign,
            if active { "activated" } else { "deactivated" }
        );
        Ok(())
    }

    /// Changes an award's name and/or description. Fields left as `None`
    /// keep their current value. Returns the updated award.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins, [`Error::NotFound`]
    /// for an unknown award and a validation error if the new name is blank
    /// or taken.
    pub fn update_award(
        &mut self,
        identity: &Identity,
        award_id: AwardId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Award> {
        identity.require_admin("edit awards")?;
        let award = self.db.in_immediate_transaction(|tx| {
            let current = require_award(tx, award_id)?;
            let name = name.unwrap_or(current.name.as_str());
            let description = description.unwrap_or(current.description.as_str());
            Database::update_award_details(tx, award_id, name, description)?;
            require_award(tx, award_id)
        })?;
        log::info!("{} updated award {award_id} ({})", identity.callsign, award.name);
        Ok(award)
    }

    /// Flips an award's active flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] for an unknown award.
    pub fn toggle_award(&mut self, identity: &Identity, award_id: AwardId) -> Result<bool> {
        identity.require_admin("change award status")?;
        self.db.in_immediate_transaction(|tx| {
            let active = !require_award(tx, award_id)?.active;
            Database::update_award_active(tx, award_id, active)?;
            Ok(active)
        })
    }

    /// Deletes an award together with its reservations. Returns how many
    /// reservations the cascade removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] for an unknown award.
    pub fn delete_award(&mut self, identity: &Identity, award_id: AwardId) -> Result<usize> {
        identity.require_admin("delete awards")?;
        let cascaded = self.db.in_immediate_transaction(|tx| {
            let held = Database::list_active(tx, award_id)?.len();
            if !Database::delete_award_row(tx, award_id)? {
                return Err(award_not_found(award_id));
            }
            Ok(held)
        })?;
        log::info!(
            "{} deleted award {award_id} and {cascaded} reservation(s)",
            identity.callsign
        );
        Ok(cascaded)
    }

    /// Lists all awards by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn list_awards(&self) -> Result<Vec<Award>> {
        Database::list_awards(self.db.connection())
    }

    /// Loads one award.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown award.
    pub fn get_award(&self, award_id: AwardId) -> Result<Award> {
        require_award(self.db.connection(), award_id)
    }

    /// Looks an award up by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no award has that name.
    pub fn find_award(&self, name: &str) -> Result<Award> {
        Database::find_award_by_name(self.db.connection(), name.trim())?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("award '{}'", name.trim()),
            }
        })
    }

    /// Returns true if the award exists and accepts reservations.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn is_award_active(&self, award_id: AwardId) -> Result<bool> {
        Ok(Database::get_award(self.db.connection(), award_id)?.is_some_and(|a| a.active))
    }

    /// Returns true if the award exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn award_exists(&self, award_id: AwardId) -> Result<bool> {
        Ok(Database::get_award(self.db.connection(), award_id)?.is_some())
    }

    /// Adds an operator to the directory.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or the callsign is
    /// already registered.
    pub fn register_operator(
        &mut self,
        callsign: &Callsign,
        name: &str,
        is_admin: bool,
    ) -> Result<Operator> {
        let operator = self
            .db
            .in_immediate_transaction(|tx| Database::insert_operator(tx, callsign, name, is_admin))?;
        log::debug!("registered operator {callsign}");
        Ok(operator)
    }

    /// Registers `callsign` as admin if the directory is still empty.
    ///
    /// The emptiness check and the insert share one immediate transaction,
    /// so of several concurrent callers exactly one becomes the first admin.
    /// Returns `None`, and writes nothing, once any operator exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank.
    pub fn register_first_admin(
        &mut self,
        callsign: &Callsign,
        name: &str,
    ) -> Result<Option<Operator>> {
        let operator = self.db.in_immediate_transaction(|tx| {
            let (operators, _) = Database::count_operators(tx)?;
            if operators > 0 {
                return Ok(None);
            }
            Database::insert_operator(tx, callsign, name, true).map(Some)
        })?;
        if operator.is_some() {
            log::info!("registered {callsign} as first admin");
        }
        Ok(operator)
    }

    /// Loads one operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the callsign is not registered.
    pub fn get_operator(&self, callsign: &Callsign) -> Result<Operator> {
        Database::get_operator(self.db.connection(), callsign)?.ok_or_else(|| Error::NotFound {
            resource: format!("operator {callsign}"),
        })
    }

    /// Lists all operators by callsign.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn list_operators(&self) -> Result<Vec<Operator>> {
        Database::list_operators(self.db.connection())
    }

    /// Grants or revokes the admin flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] if the callsign is not registered.
    pub fn set_admin(&mut self, identity: &Identity, callsign: &Callsign, admin: bool) -> Result<()> {
        identity.require_admin("change admin rights")?;
        let updated = self
            .db
            .in_immediate_transaction(|tx| Database::update_operator_admin(tx, callsign, admin))?;
        if !updated {
            return Err(Error::NotFound {
                resource: format!("operator {callsign}"),
            });
        }
        log::info!(
            "{} {} admin rights for {callsign}",
            identity.callsign,
            if admin { "granted" } else { "revoked" }
        );
        Ok(())
    }
}

fn award_not_found(award_id: AwardId) -> Error {
    Error::NotFound {
        resource: format!("award {award_id}"),
    }
}
