#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # quend
//!
//! A library for coordinating band/mode reservations between radio
//! operators who share a special callsign during an award event.
//!
//! Each operator may block exactly one band/mode channel per award at a
//! time. Blocks are granted atomically against a shared `SQLite` store, so
//! any number of processes can coordinate through one database file.
//!
//! ## Core Types
//!
//! - [`ReservationManager`]: block, unblock and force-release operations
//! - [`Channel`] and [`ResourceCatalog`]: the configured band/mode space
//! - [`Reservation`]: an active hold of one channel in one award
//! - [`Identity`], [`Callsign`] and [`Operator`]: who is asking
//! - [`SessionHook`]: releases reservations when a session ends
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use quend::{Callsign, ResourceCatalog};
//!
//! let catalog = ResourceCatalog::default();
//! let channel = catalog.normalize("20M", " cw").unwrap();
//! assert_eq!(channel.to_string(), "20m/CW");
//!
//! assert!(catalog.normalize("11m", "CW").is_err());
//! assert_eq!(Callsign::parse("ea1aaa").unwrap().as_str(), "EA1AAA");
//! ```

pub mod award;
pub mod config;
pub mod database;
pub mod error;
pub mod init;
pub mod lifecycle;
pub mod logging;
pub mod manager;
pub mod operator;
pub mod reservation;
pub mod resource;

// Re-export key types at crate root for convenience
pub use award::{Award, AwardId};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, SessionId};
pub use error::{Error, Result};
pub use lifecycle::{EndReason, SessionHook};
pub use logging::{init_logger, LogLevel, Logger};
pub use manager::{BlockOutcome, ChannelStatus, ReservationManager, Stats};
pub use operator::{Callsign, Holder, Identity, Operator};
pub use reservation::{Reservation, ReservationId};
pub use resource::{Channel, ResourceCatalog, ResourceKey};
