//! Reservation records.
//!
//! A reservation is an active, exclusive hold of one [`Channel`] within one
//! award by one operator. Reservations are immutable: they are created by a
//! block and destroyed by a release, never edited in place.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::award::AwardId;
use crate::operator::Callsign;
use crate::resource::{Channel, ResourceKey};

/// Store-assigned reservation identifier.
pub type ReservationId = i64;

/// An active band/mode hold.
///
/// # Examples
///
/// ```
/// use quend::{AwardId, Callsign, Reservation, ResourceCatalog};
///
/// let channel = ResourceCatalog::default().normalize("40m", "SSB").unwrap();
/// let operator = Callsign::parse("EA1AAA").unwrap();
///
/// let reservation = Reservation::builder(AwardId::new(1), channel, operator)
///     .id(7)
///     .build();
///
/// assert_eq!(reservation.id(), 7);
/// assert_eq!(reservation.channel().band(), "40m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    award_id: AwardId,
    channel: Channel,
    operator: Callsign,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(award_id: AwardId, channel: Channel, operator: Callsign) -> ReservationBuilder {
        ReservationBuilder {
            id: 0,
            award_id,
            channel,
            operator,
            created_at: None,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the award this reservation belongs to.
    #[must_use]
    pub const fn award_id(&self) -> AwardId {
        self.award_id
    }

    /// Returns the held channel.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the holder's callsign.
    #[must_use]
    pub const fn operator(&self) -> &Callsign {
        &self.operator
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns the resource key this reservation occupies.
    #[must_use]
    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.award_id, self.channel.clone())
    }
}

/// Builder for [`Reservation`] values.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    award_id: AwardId,
    channel: Channel,
    operator: Callsign,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the store-assigned identifier.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation, stamping it with the current time if no
    /// creation timestamp was given.
    #[must_use]
    pub fn build(self) -> Reservation {
        Reservation {
            id: self.id,
            award_id: self.award_id,
            channel: self.channel,
            operator: self.operator,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceCatalog;
    use std::time::Duration;

    fn sample(band: &str, mode: &str) -> Reservation {
        let channel = ResourceCatalog::default().normalize(band, mode).unwrap();
        Reservation::builder(AwardId::new(1), channel, Callsign::parse("EA1AAA").unwrap()).build()
    }

    #[test]
    fn test_builder_defaults() {
        let before = SystemTime::now();
        let r = sample("20m", "CW");
        assert_eq!(r.id(), 0);
        assert!(r.created_at() >= before);
        assert_eq!(r.operator().as_str(), "EA1AAA");
    }

    #[test]
    fn test_builder_explicit_timestamp() {
        let ts = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let channel = ResourceCatalog::default().normalize("6m", "FT8").unwrap();
        let r = Reservation::builder(AwardId::new(2), channel, Callsign::parse("EA1BBB").unwrap())
            .id(11)
            .created_at(ts)
            .build();
        assert_eq!(r.created_at(), ts);
        assert_eq!(r.id(), 11);
        assert_eq!(r.award_id(), AwardId::new(2));
    }

    #[test]
    fn test_key_matches_fields() {
        let r = sample("15m", "RTTY");
        let key = r.key();
        assert_eq!(key.award_id, AwardId::new(1));
        assert_eq!(key.channel.to_string(), "15m/RTTY");
    }

    #[test]
    fn test_serialize_reservation() {
        let r = sample("40m", "SSB");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["award_id"], 1);
        assert_eq!(json["operator"], "EA1AAA");
        assert_eq!(json["channel"]["band"], "40m");
    }
}
