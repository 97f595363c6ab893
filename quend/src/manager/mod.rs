//! The reservation manager.
//!
//! [`ReservationManager`] grants, releases and force-releases band/mode
//! locks on top of the [`Database`] store. It holds no authoritative state
//! of its own: every decision is made inside a store transaction, so any
//! number of managers (one per process or thread, each with its own
//! connection) may share one database file.
//!
//! Per resource key the lifecycle is `Free -> Held(op)` on block and
//! `Held -> Free` on unblock, force-release, session end or cascade. A key
//! never moves directly from one holder to another.

mod directory;
mod views;

pub use views::{ChannelStatus, Stats};

use rusqlite::Connection;
use serde::Serialize;

use crate::award::{Award, AwardId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::operator::{Callsign, Identity};
use crate::reservation::Reservation;
use crate::resource::{Channel, ResourceCatalog};

/// Result of a successful [`ReservationManager::block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutcome {
    /// The reservation now held by the caller.
    pub reservation: Reservation,
    /// The caller's previous channel in the same award, released by this
    /// block.
    pub superseded: Option<Channel>,
    /// True if the caller already held the requested channel and nothing
    /// changed.
    pub unchanged: bool,
}

/// Grants and releases band/mode reservations.
///
/// # Examples
///
/// ```no_run
/// use quend::{Callsign, Database, DatabaseConfig, Identity, ReservationManager, ResourceCatalog};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/quend.db")).unwrap();
/// let mut manager = ReservationManager::new(db, ResourceCatalog::default());
///
/// let admin = Identity::admin(Callsign::parse("EA1ADM").unwrap());
/// let award = manager.create_award(&admin, "EG90IARU", "IARU day").unwrap();
/// manager.register_operator(&admin.callsign, "Admin", true).unwrap();
///
/// let outcome = manager.block(&admin, award.id, "20m", "CW").unwrap();
/// println!("holding {}", outcome.reservation.channel());
/// ```
#[derive(Debug)]
pub struct ReservationManager {
    db: Database,
    catalog: ResourceCatalog,
}

impl ReservationManager {
    /// Creates a manager over an open database and a band/mode catalog.
    #[must_use]
    pub const fn new(db: Database, catalog: ResourceCatalog) -> Self {
        Self { db, catalog }
    }

    /// Returns the band/mode catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Returns the underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Returns the underlying database mutably.
    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Blocks a channel for the caller, superseding the caller's previous
    /// reservation in the same award.
    ///
    /// The release of the previous reservation and the claim of the new one
    /// run in one immediate transaction. If the claim loses to another
    /// operator the release still commits, and the returned
    /// [`Error::Conflict`] carries the released channel.
    ///
    /// Blocking the channel already held is a no-op that returns the
    /// existing reservation with `unchanged` set.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidResource`] if the band or mode is not in the catalog
    /// - [`Error::NotFound`] if the award or the caller's operator record is
    ///   missing
    /// - [`Error::AwardInactive`] if the award does not accept reservations
    /// - [`Error::Conflict`] if another operator holds the channel
    /// - [`Error::StoreTimeout`] if the write lock is not obtained in time
    pub fn block(
        &mut self,
        identity: &Identity,
        award_id: AwardId,
        band: &str,
        mode: &str,
    ) -> Result<BlockOutcome> {
        let channel = self.catalog.normalize(band, mode)?;
        let millis = self.db.busy_timeout_millis();
        Self::run_block(&mut self.db, &identity.callsign, award_id, channel)
            .map_err(|e| e.into_store_error(millis))
    }

    fn run_block(
        db: &mut Database,
        callsign: &Callsign,
        award_id: AwardId,
        channel: Channel,
    ) -> Result<BlockOutcome> {
        let tx = db.begin_immediate()?;
        let award = require_award(&tx, award_id)?;
        if !award.active {
            return Err(Error::AwardInactive { award_id });
        }

        let prior = Database::reservation_for_operator(&tx, award_id, callsign)?;
        if let Some(existing) = prior.as_ref().filter(|r| r.channel() == &channel) {
            let reservation = existing.clone();
            tx.commit()?;
            return Ok(BlockOutcome {
                reservation,
                superseded: None,
                unchanged: true,
            });
        }

        let superseded = match prior {
            Some(previous) => {
                Database::release_by_key(&tx, award_id, previous.channel())?;
                Some(previous.channel().clone())
            }
            None => None,
        };

        match Database::try_create(&tx, award_id, &channel, callsign) {
            Ok(reservation) => {
                tx.commit()?;
                log::debug!("{callsign} blocked {channel} in award {award_id}");
                Ok(BlockOutcome {
                    reservation,
                    superseded,
                    unchanged: false,
                })
            }
            Err(Error::Conflict {
                award_id,
                channel,
                holder,
                ..
            }) => {
                // The superseded reservation stays released
                tx.commit()?;
                Err(Error::Conflict {
                    award_id,
                    channel,
                    holder,
                    released: superseded,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Releases a channel held by the caller.
    ///
    /// Returns `false` if the channel was already free. Releasing is allowed
    /// on inactive awards.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidResource`] if the band or mode is not in the catalog
    /// - [`Error::NotFound`] if the award does not exist
    /// - [`Error::NotOwner`] if another operator holds the channel
    pub fn unblock(
        &mut self,
        identity: &Identity,
        award_id: AwardId,
        band: &str,
        mode: &str,
    ) -> Result<bool> {
        let channel = self.catalog.normalize(band, mode)?;
        self.db.in_immediate_transaction(|tx| {
            require_award(tx, award_id)?;
            match Database::holder_of(tx, award_id, &channel)? {
                None => Ok(false),
                Some(holder) if holder.callsign == identity.callsign => {
                    Database::release_by_key(tx, award_id, &channel)
                }
                Some(holder) => Err(Error::NotOwner {
                    award_id,
                    channel: channel.clone(),
                    holder,
                    requester: identity.callsign.clone(),
                }),
            }
        })
    }

    /// Releases a channel regardless of who holds it.
    ///
    /// Returns `false` if nothing was held. The dispossessed holder is
    /// logged at info level.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if the caller is not an admin; nothing is
    ///   released
    /// - [`Error::InvalidResource`] if the band or mode is not in the catalog
    /// - [`Error::NotFound`] if the award does not exist
    pub fn force_release(
        &mut self,
        identity: &Identity,
        award_id: AwardId,
        band: &str,
        mode: &str,
    ) -> Result<bool> {
        identity.require_admin("force-release reservations")?;
        let channel = self.catalog.normalize(band, mode)?;

        let released = self.db.in_immediate_transaction(|tx| {
            require_award(tx, award_id)?;
            match Database::holder_of(tx, award_id, &channel)? {
                None => Ok(None),
                Some(holder) => {
                    Database::release_by_key(tx, award_id, &channel)?;
                    Ok(Some(holder))
                }
            }
        })?;

        match released {
            Some(holder) => {
                log::info!(
                    "{} force-released {channel} in award {award_id} from {holder}",
                    identity.callsign
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Releases every reservation an operator holds, optionally only in one
    /// award. Returns how many were released.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreTimeout`] or a storage error if the delete
    /// fails.
    pub fn release_all_for_operator(
        &mut self,
        operator: &Callsign,
        award_id: Option<AwardId>,
    ) -> Result<usize> {
        let count = self
            .db
            .in_immediate_transaction(|tx| Database::release_all_for_operator(tx, award_id, operator))?;
        if count > 0 {
            log::debug!("released {count} reservation(s) held by {operator}");
        }
        Ok(count)
    }

    /// Lists the reservations in an award as one consistent snapshot,
    /// ordered by band then mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the award does not exist.
    pub fn list_active(&mut self, award_id: AwardId) -> Result<Vec<Reservation>> {
        self.db.in_read_transaction(|tx| {
            require_award(tx, award_id)?;
            Database::list_active(tx, award_id)
        })
    }
}

/// Loads an award or fails with [`Error::NotFound`].
pub(crate) fn require_award(conn: &Connection, award_id: AwardId) -> Result<Award> {
    Database::get_award(conn, award_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("award {award_id}"),
    })
}
