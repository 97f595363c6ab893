//! Session lifecycle integration.
//!
//! The auth collaborator reports session starts and ends through
//! [`SessionHook`]. Ending a session releases every reservation its operator
//! holds, across all awards. Each session row is deleted in the same
//! transaction as the release, so a repeated end notification for the same
//! session finds nothing and releases nothing.

use std::fmt;

use crate::database::{Database, SessionId};
use crate::error::{Error, Result};
use crate::manager::ReservationManager;
use crate::operator::{Callsign, Identity};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The operator logged out.
    Logout,
    /// The session timed out.
    Expired,
    /// The operator was removed from the directory.
    OperatorRemoved,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Logout => "logout",
            Self::Expired => "expired",
            Self::OperatorRemoved => "operator removed",
        };
        f.write_str(s)
    }
}

/// Receives session notifications from the auth layer.
///
/// # Examples
///
/// ```no_run
/// use quend::{Callsign, Database, DatabaseConfig, EndReason, Identity};
/// use quend::{ReservationManager, ResourceCatalog, SessionHook};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/quend.db")).unwrap();
/// let mut manager = ReservationManager::new(db, ResourceCatalog::default());
/// let me = Identity::operator(Callsign::parse("EA1AAA").unwrap());
///
/// let session = manager.session_started(&me).unwrap();
/// // ... block and unblock ...
/// let released = manager.session_ended(session, EndReason::Logout).unwrap();
/// println!("released {released} reservation(s)");
/// ```
pub trait SessionHook {
    /// Records a new session and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the operator is not registered.
    fn session_started(&mut self, identity: &Identity) -> Result<SessionId>;

    /// Ends a session and releases its operator's reservations.
    ///
    /// Returns the number of reservations released; `0` if the session had
    /// already ended.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the transaction fails, in which case the
    /// session stays open and nothing is released.
    fn session_ended(&mut self, session: SessionId, reason: EndReason) -> Result<usize>;
}

impl SessionHook for ReservationManager {
    fn session_started(&mut self, identity: &Identity) -> Result<SessionId> {
        let session = self
            .database_mut()
            .in_immediate_transaction(|tx| Database::insert_session(tx, &identity.callsign))?;
        log::debug!("session {session} started for {}", identity.callsign);
        Ok(session)
    }

    fn session_ended(&mut self, session: SessionId, reason: EndReason) -> Result<usize> {
        let ended = self.database_mut().in_immediate_transaction(|tx| {
            let Some(operator) = Database::session_operator(tx, session)? else {
                return Ok(None);
            };
            Database::delete_session(tx, session)?;
            let released = Database::release_all_for_operator(tx, None, &operator)?;
            Ok(Some((operator, released)))
        })?;

        match ended {
            Some((operator, released)) => {
                log::info!(
                    "session {session} of {operator} ended ({reason}); released {released} reservation(s)"
                );
                Ok(released)
            }
            None => {
                log::debug!("session {session} already ended");
                Ok(0)
            }
        }
    }
}

impl ReservationManager {
    /// Removes an operator from the directory, ending their sessions and
    /// releasing their reservations in the same transaction. Returns how
    /// many reservations were released.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for non-admins and
    /// [`Error::NotFound`] if the callsign is not registered.
    pub fn remove_operator(&mut self, identity: &Identity, callsign: &Callsign) -> Result<usize> {
        identity.require_admin("remove operators")?;
        let released = self.database_mut().in_immediate_transaction(|tx| {
            if Database::get_operator(tx, callsign)?.is_none() {
                return Err(Error::NotFound {
                    resource: format!("operator {callsign}"),
                });
            }
            Database::delete_sessions_for_operator(tx, callsign)?;
            let released = Database::release_all_for_operator(tx, None, callsign)?;
            Database::delete_operator_row(tx, callsign)?;
            Ok(released)
        })?;
        log::info!(
            "{} removed operator {callsign} ({}); released {released} reservation(s)",
            identity.callsign,
            EndReason::OperatorRemoved
        );
        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::award::AwardId;
    use crate::database::test_util::{create_test_database, seed_award, seed_operator};
    use crate::resource::ResourceCatalog;

    struct Fixture {
        manager: ReservationManager,
        first: AwardId,
        second: AwardId,
        alice: Identity,
    }

    fn fixture() -> Fixture {
        let db = create_test_database();
        let first = seed_award(&db, "EG90IARU");
        let second = seed_award(&db, "AM70ABC");
        let alice = Identity::operator(seed_operator(&db, "EA1AAA", "Alice"));
        Fixture {
            manager: ReservationManager::new(db, ResourceCatalog::default()),
            first,
            second,
            alice,
        }
    }

    #[test]
    fn test_session_end_releases_across_awards() {
        let mut f = fixture();
        let session = f.manager.session_started(&f.alice).unwrap();
        f.manager.block(&f.alice, f.first, "20m", "CW").unwrap();
        f.manager.block(&f.alice, f.second, "15m", "FT8").unwrap();

        assert_eq!(f.manager.session_ended(session, EndReason::Logout).unwrap(), 2);
        assert!(f.manager.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_session_end_is_exactly_once() {
        let mut f = fixture();
        let session = f.manager.session_started(&f.alice).unwrap();
        f.manager.block(&f.alice, f.first, "20m", "CW").unwrap();

        assert_eq!(f.manager.session_ended(session, EndReason::Expired).unwrap(), 1);

        // A reservation made after the first end survives a duplicate notification
        f.manager.block(&f.alice, f.first, "40m", "CW").unwrap();
        assert_eq!(f.manager.session_ended(session, EndReason::Expired).unwrap(), 0);
        assert_eq!(f.manager.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_session_for_unknown_operator() {
        let mut f = fixture();
        let ghost = Identity::operator(Callsign::parse("EA9ZZZ").unwrap());
        assert!(matches!(
            f.manager.session_started(&ghost),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_operator() {
        let mut f = fixture();
        let session = f.manager.session_started(&f.alice).unwrap();
        f.manager.block(&f.alice, f.first, "20m", "CW").unwrap();
        let admin = Identity::admin(Callsign::parse("EA1ADM").unwrap());

        assert!(matches!(
            f.manager.remove_operator(&f.alice, &f.alice.callsign),
            Err(Error::Unauthorized { .. })
        ));

        assert_eq!(f.manager.remove_operator(&admin, &f.alice.callsign).unwrap(), 1);
        assert!(f.manager.get_operator(&f.alice.callsign).is_err());
        assert_eq!(f.manager.session_ended(session, EndReason::Logout).unwrap(), 0);
        assert!(matches!(
            f.manager.remove_operator(&admin, &f.alice.callsign),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_end_reason_display() {
        assert_eq!(EndReason::OperatorRemoved.to_string(), "operator removed");
    }
}
