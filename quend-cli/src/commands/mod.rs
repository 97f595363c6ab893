//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `award`: Create, list, activate, deactivate and delete awards
//! - `operator`: Register, list, promote, demote and remove operators
//! - `block` / `unblock`: Take or give back a band/mode
//! - `force_release`: Release any holder's band/mode (admin)
//! - `release_all`: Release every reservation of an operator
//! - `list`: List active reservations
//! - `occupancy`: Show the band/mode grid of an award
//! - `stats`: Show system-wide counters
//! - `session`: Start and end operator sessions
//! - `show_data_dir`: Show resolved data directory path
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

use crate::error::CliError;

pub mod award;
pub mod block;
pub mod completions;
pub mod init;
pub mod list;
pub mod occupancy;
pub mod operator;
pub mod session;
pub mod show_data_dir;
pub mod stats;
pub mod validate;

pub use award::AwardCommand;
pub use block::{BlockCommand, ForceReleaseCommand, ReleaseAllCommand, UnblockCommand};
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use occupancy::OccupancyCommand;
pub use operator::OperatorCommand;
pub use session::SessionCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use stats::StatsCommand;
pub use validate::ValidateCommand;

/// Map a CSV writer error onto the CLI I/O error.
pub(crate) fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
