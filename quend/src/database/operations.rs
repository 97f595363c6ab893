//! Reservation store operations.
//!
//! Every function here takes a plain connection (or transaction, which
//! dereferences to one) and never opens its own transaction; callers group
//! calls into the atomic units they need. Uniqueness is enforced by the
//! schema, not by checking first.

use std::time::{Duration, SystemTime};

use rusqlite::{params, Connection, OptionalExtension};

use crate::award::AwardId;
use crate::error::{is_unique_violation, Error, Result};
use crate::operator::{Callsign, Holder};
use crate::reservation::Reservation;
use crate::resource::Channel;

use super::connection::Database;
use super::schema::{DELETE_RESERVATION_BY_KEY, INSERT_RESERVATION, RESERVATION_COLUMNS};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Reads a callsign column, rejecting values that no longer parse.
pub(super) fn callsign_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Callsign> {
    let raw: String = row.get(idx)?;
    Callsign::parse(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Deserializes a reservation from a row selected with `RESERVATION_COLUMNS`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let award_id: i64 = row.get(1)?;
    let band: String = row.get(2)?;
    let mode: String = row.get(3)?;
    let operator = callsign_column(row, 4)?;
    let created_secs: i64 = row.get(5)?;

    Ok(Reservation::builder(
        AwardId::new(award_id),
        Channel::from_stored(band, mode),
        operator,
    )
    .id(id)
    .created_at(unix_secs_to_systemtime(created_secs))
    .build())
}

fn collect_reservations(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let reservations = stmt
        .query_map(params, row_to_reservation)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
    Ok(reservations)
}

const SELECT_HOLDER: &str = r"
    SELECT o.callsign, o.name
    FROM reservations r
    JOIN operators o ON o.callsign = r.operator_callsign
    WHERE r.award_id = ? AND r.band = ? AND r.mode = ?
";

const SELECT_HOLDERS_FOR_AWARD: &str = r"
    SELECT r.band, r.mode, o.callsign, o.name
    FROM reservations r
    JOIN operators o ON o.callsign = r.operator_callsign
    WHERE r.award_id = ?
    ORDER BY r.band, r.mode
";

const DELETE_FOR_OPERATOR: &str = "DELETE FROM reservations WHERE operator_callsign = ?";

const DELETE_FOR_OPERATOR_IN_AWARD: &str =
    "DELETE FROM reservations WHERE operator_callsign = ? AND award_id = ?";

impl Database {
    /// Inserts a reservation guarded by the schema's uniqueness constraints.
    ///
    /// This is the compare-and-set of the reservation system: the insert
    /// either claims the channel or fails on the `(award_id, band, mode)`
    /// constraint, in which case the current holder is returned inside
    /// [`Error::Conflict`]. The caller is responsible for having released
    /// the operator's prior reservation in the same award.
    ///
    /// # Errors
    ///
    /// - [`Error::Conflict`] if another operator holds the channel
    /// - [`Error::Validation`] if the operator already holds a different
    ///   channel in this award
    /// - [`Error::Database`] for any other storage failure, including
    ///   foreign-key violations for an unknown award or operator
    pub fn try_create(
        conn: &Connection,
        award_id: AwardId,
        channel: &Channel,
        operator: &Callsign,
    ) -> Result<Reservation> {
        let created_at = SystemTime::now();
        let created_secs = systemtime_to_unix_secs(created_at)?;

        let inserted = conn.execute(
            INSERT_RESERVATION,
            params![
                award_id.value(),
                channel.band(),
                channel.mode(),
                operator.as_str(),
                created_secs,
            ],
        );

        match inserted {
            Ok(_) => Ok(Reservation::builder(award_id, channel.clone(), operator.clone())
                .id(conn.last_insert_rowid())
                .created_at(unix_secs_to_systemtime(created_secs))
                .build()),
            Err(e) if is_unique_violation(&e) => {
                if let Some(holder) = Self::holder_of(conn, award_id, channel)? {
                    return Err(Error::Conflict {
                        award_id,
                        channel: channel.clone(),
                        holder,
                        released: None,
                    });
                }
                Err(Error::Validation {
                    field: "operator".into(),
                    message: format!("{operator} already holds a channel in award {award_id}"),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the reservation on a resource key.
    ///
    /// Returns `false` if the key was already free.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn release_by_key(conn: &Connection, award_id: AwardId, channel: &Channel) -> Result<bool> {
        let rows = conn.execute(
            DELETE_RESERVATION_BY_KEY,
            params![award_id.value(), channel.band(), channel.mode()],
        )?;
        Ok(rows > 0)
    }

    /// Deletes every reservation held by an operator, optionally scoped to
    /// one award. Returns the number of reservations deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn release_all_for_operator(
        conn: &Connection,
        award_id: Option<AwardId>,
        operator: &Callsign,
    ) -> Result<usize> {
        let rows = match award_id {
            Some(award) => conn.execute(
                DELETE_FOR_OPERATOR_IN_AWARD,
                params![operator.as_str(), award.value()],
            )?,
            None => conn.execute(DELETE_FOR_OPERATOR, params![operator.as_str()])?,
        };
        Ok(rows)
    }

    /// Lists all reservations for one award, ordered by band then mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active(conn: &Connection, award_id: AwardId) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE award_id = ? ORDER BY band, mode"
        );
        collect_reservations(conn, &sql, params![award_id.value()])
    }

    /// Lists every reservation across all awards.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY award_id, band, mode"
        );
        collect_reservations(conn, &sql, [])
    }

    /// Lists an operator's reservations, optionally scoped to one award.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_operator(
        conn: &Connection,
        operator: &Callsign,
        award_id: Option<AwardId>,
    ) -> Result<Vec<Reservation>> {
        match award_id {
            Some(award) => {
                let sql = format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations
                     WHERE operator_callsign = ? AND award_id = ?
                     ORDER BY award_id, band, mode"
                );
                collect_reservations(conn, &sql, params![operator.as_str(), award.value()])
            }
            None => {
                let sql = format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations
                     WHERE operator_callsign = ?
                     ORDER BY award_id, band, mode"
                );
                collect_reservations(conn, &sql, params![operator.as_str()])
            }
        }
    }

    /// Returns the reservation on a resource key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(
        conn: &Connection,
        award_id: AwardId,
        channel: &Channel,
    ) -> Result<Option<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE award_id = ? AND band = ? AND mode = ?"
        );
        Ok(conn
            .query_row(
                &sql,
                params![award_id.value(), channel.band(), channel.mode()],
                row_to_reservation,
            )
            .optional()?)
    }

    /// Returns the operator's reservation within an award, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservation_for_operator(
        conn: &Connection,
        award_id: AwardId,
        operator: &Callsign,
    ) -> Result<Option<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE award_id = ? AND operator_callsign = ?"
        );
        Ok(conn
            .query_row(
                &sql,
                params![award_id.value(), operator.as_str()],
                row_to_reservation,
            )
            .optional()?)
    }

    /// Returns who holds a resource key, if anyone.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn holder_of(
        conn: &Connection,
        award_id: AwardId,
        channel: &Channel,
    ) -> Result<Option<Holder>> {
        Ok(conn
            .query_row(
                SELECT_HOLDER,
                params![award_id.value(), channel.band(), channel.mode()],
                |row| {
                    Ok(Holder {
                        callsign: callsign_column(row, 0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?)
    }

    /// Returns every held channel in an award with its holder.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn holders_for_award(conn: &Connection, award_id: AwardId) -> Result<Vec<(Channel, Holder)>> {
        let mut stmt = conn.prepare(SELECT_HOLDERS_FOR_AWARD)?;
        let rows = stmt
            .query_map(params![award_id.value()], |row| {
                let channel = Channel::from_stored(row.get(0)?, row.get(1)?);
                let holder = Holder {
                    callsign: callsign_column(row, 2)?,
                    name: row.get(3)?,
                };
                Ok((channel, holder))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }

    /// Counts all reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservations(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reservations", [], |r| r.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Counts operators currently holding at least one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_holding_operators(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT operator_callsign) FROM reservations",
            [],
            |r| r.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Verifies database integrity using `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the corruption if the check
    /// does not report `ok`.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::Validation {
                field: "database".into(),
                message: format!("Integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        channel, create_test_database, seed_award, seed_operator,
    };

    #[test]
    fn test_try_create_and_get() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let alice = seed_operator(&db, "EA1AAA", "Alice");

        let created = Database::try_create(db.connection(), award, &channel("20m", "CW"), &alice)
            .unwrap();
        assert!(created.id() > 0);

        let loaded = Database::get_reservation(db.connection(), award, &channel("20m", "CW"))
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_try_create_conflict_names_holder() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let alice = seed_operator(&db, "EA1AAA", "Alice");
        let bob = seed_operator(&db, "EA1BBB", "Bob");

        Database::try_create(db.connection(), award, &channel("20m", "CW"), &alice).unwrap();
        let err = Database::try_create(db.connection(), award, &channel("20m", "CW"), &bob)
            .unwrap_err();

        match err {
            Error::Conflict { holder, released, .. } => {
                assert_eq!(holder.callsign, alice);
                assert_eq!(holder.name, "Alice");
                assert!(released.is_none());
            }
            other => panic!("expected conflict, got {other}"),
        }
    }

    #[test]
    fn test_same_channel_different_awards() {
        let db = create_test_database();
        let a1 = seed_award(&db, "EG90IARU");
        let a2 = seed_award(&db, "AM500");
        let alice = seed_operator(&db, "EA1AAA", "Alice");
        let bob = seed_operator(&db, "EA1BBB", "Bob");

        Database::try_create(db.connection(), a1, &channel("40m", "SSB"), &alice).unwrap();
        Database::try_create(db.connection(), a2, &channel("40m", "SSB"), &bob).unwrap();

        assert_eq!(Database::list_all(db.connection()).unwrap().len(), 2);
    }

    #[test]
    fn test_second_channel_same_award_rejected_by_schema() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let alice = seed_operator(&db, "EA1AAA", "Alice");

        Database::try_create(db.connection(), award, &channel("20m", "CW"), &alice).unwrap();
        let err = Database::try_create(db.connection(), award, &channel("40m", "CW"), &alice)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_try_create_unknown_award_is_foreign_key_failure() {
        let db = create_test_database();
        let alice = seed_operator(&db, "EA1AAA", "Alice");

        let err = Database::try_create(
            db.connection(),
            AwardId::new(999),
            &channel("20m", "CW"),
            &alice,
        )
        .unwrap_err();
        let Error::Database(raw) = err else {
            panic!("expected raw database error");
        };
        assert!(matches!(
            Error::from_store(raw, 5000),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_release_by_key_idempotent() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let alice = seed_operator(&db, "EA1AAA", "Alice");
        Database::try_create(db.connection(), award, &channel("15m", "FT8"), &alice).unwrap();

        assert!(Database::release_by_key(db.connection(), award, &channel("15m", "FT8")).unwrap());
        assert!(!Database::release_by_key(db.connection(), award, &channel("15m", "FT8")).unwrap());
    }

    #[test]
    fn test_release_all_for_operator_scoping() {
        let db = create_test_database();
        let a1 = seed_award(&db, "EG90IARU");
        let a2 = seed_award(&db, "AM500");
        let alice = seed_operator(&db, "EA1AAA", "Alice");

        Database::try_create(db.connection(), a1, &channel("20m", "CW"), &alice).unwrap();
        Database::try_create(db.connection(), a2, &channel("40m", "CW"), &alice).unwrap();

        assert_eq!(
            Database::release_all_for_operator(db.connection(), Some(a1), &alice).unwrap(),
            1
        );
        assert_eq!(
            Database::release_all_for_operator(db.connection(), None, &alice).unwrap(),
            1
        );
        assert_eq!(
            Database::release_all_for_operator(db.connection(), None, &alice).unwrap(),
            0
        );
    }

    #[test]
    fn test_list_active_ordering() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let ops = [
            (seed_operator(&db, "EA1AAA", "A"), channel("40m", "SSB")),
            (seed_operator(&db, "EA1BBB", "B"), channel("20m", "FT8")),
            (seed_operator(&db, "EA1CCC", "C"), channel("20m", "CW")),
        ];
        for (op, ch) in &ops {
            Database::try_create(db.connection(), award, ch, op).unwrap();
        }

        let listed: Vec<String> = Database::list_active(db.connection(), award)
            .unwrap()
            .iter()
            .map(|r| r.channel().to_string())
            .collect();
        assert_eq!(listed, vec!["20m/CW", "20m/FT8", "40m/SSB"]);
    }

    #[test]
    fn test_reservation_for_operator_and_holders() {
        let db = create_test_database();
        let award = seed_award(&db, "EG90IARU");
        let alice = seed_operator(&db, "EA1AAA", "Alice");
        Database::try_create(db.connection(), award, &channel("6m", "FT4"), &alice).unwrap();

        let held = Database::reservation_for_operator(db.connection(), award, &alice)
            .unwrap()
            .unwrap();
        assert_eq!(held.channel(), &channel("6m", "FT4"));

        let holders = Database::holders_for_award(db.connection(), award).unwrap();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].1.name, "Alice");

        assert_eq!(Database::count_reservations(db.connection()).unwrap(), 1);
        assert_eq!(Database::count_holding_operators(db.connection()).unwrap(), 1);
    }

    #[test]
    fn test_list_for_operator() {
        let db = create_test_database();
        let a1 = seed_award(&db, "EG90IARU");
        let a2 = seed_award(&db, "AM500");
        let alice = seed_operator(&db, "EA1AAA", "Alice");
        Database::try_create(db.connection(), a1, &channel("20m", "CW"), &alice).unwrap();
        Database::try_create(db.connection(), a2, &channel("20m", "CW"), &alice).unwrap();

        assert_eq!(
            Database::list_for_operator(db.connection(), &alice, None)
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            Database::list_for_operator(db.connection(), &alice, Some(a2))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
