//! Read-only views over the reservation tables.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::award::AwardId;
use crate::database::Database;
use crate::error::Result;
use crate::operator::{Callsign, Holder};
use crate::reservation::Reservation;
use crate::resource::Channel;

use super::{require_award, ReservationManager};

/// One cell of the band/mode grid of an award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelStatus {
    /// The channel.
    pub channel: Channel,
    /// Who holds it, if anyone.
    pub holder: Option<Holder>,
}

/// System-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Registered operators.
    pub operators: usize,
    /// Registered operators with the admin flag.
    pub admins: usize,
    /// Awards, active or not.
    pub awards: usize,
    /// Awards accepting reservations.
    pub active_awards: usize,
    /// Reservations across all awards.
    pub active_reservations: usize,
    /// Distinct operators holding at least one reservation.
    pub holding_operators: usize,
    /// Sessions not yet ended.
    pub open_sessions: usize,
}

impl ReservationManager {
    /// Returns every catalog channel of an award, in catalog order, with
    /// its holder.
    ///
    /// Held channels that are no longer in the catalog (after a
    /// configuration change) are appended after the grid so no reservation
    /// is hidden.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the award does
    /// not exist.
    pub fn occupancy(&mut self, award_id: AwardId) -> Result<Vec<ChannelStatus>> {
        let mut held: BTreeMap<Channel, Holder> = self
            .db
            .in_read_transaction(|tx| {
                require_award(tx, award_id)?;
                Database::holders_for_award(tx, award_id)
            })?
            .into_iter()
            .collect();

        let mut grid: Vec<ChannelStatus> = self
            .catalog
            .channels()
            .map(|channel| {
                let holder = held.remove(&channel);
                ChannelStatus { channel, holder }
            })
            .collect();

        grid.extend(held.into_iter().map(|(channel, holder)| ChannelStatus {
            channel,
            holder: Some(holder),
        }));
        Ok(grid)
    }

    /// Lists an operator's reservations, across all awards or in one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn operator_reservations(
        &mut self,
        operator: &Callsign,
        award_id: Option<AwardId>,
    ) -> Result<Vec<Reservation>> {
        self.db
            .in_read_transaction(|tx| Database::list_for_operator(tx, operator, award_id))
    }

    /// Lists every reservation in every award.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn list_all(&mut self) -> Result<Vec<Reservation>> {
        self.db.in_read_transaction(|tx| Database::list_all(tx))
    }

    /// Collects the system counters from one snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any count fails.
    pub fn stats(&mut self) -> Result<Stats> {
        self.db.in_read_transaction(|tx| {
            let (operators, admins) = Database::count_operators(tx)?;
            let (awards, active_awards) = Database::count_awards(tx)?;
            Ok(Stats {
                operators,
                admins,
                awards,
                active_awards,
                active_reservations: Database::count_reservations(tx)?,
                holding_operators: Database::count_holding_operators(tx)?,
                open_sessions: Database::count_sessions(tx)?,
            })
        })
    }
}
