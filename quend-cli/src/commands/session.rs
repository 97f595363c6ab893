//! Session commands.
//!
//! A front end that manages its own logins calls `session start` when an
//! operator logs in and `session end` when the session finishes. Ending a
//! session releases every reservation the operator holds.

use crate::error::CliError;
use crate::utils::{open_manager, report, resolve_identity, GlobalOptions};
use clap::{Args, Subcommand, ValueEnum};
use quend::{EndReason, SessionHook, SessionId};

/// Start or end operator sessions.
#[derive(Args)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub action: SessionAction,
}

/// Session subcommands.
#[derive(Subcommand)]
pub enum SessionAction {
    /// Open a session for the `--as` operator and print its id
    Start,

    /// End a session and release the operator's reservations
    End {
        /// Session id printed by `session start`
        id: SessionId,

        /// Why the session ended
        #[arg(long, value_enum, default_value = "logout", ignore_case = true)]
        reason: EndReasonArg,
    },
}

/// Command-line spelling of [`EndReason`].
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EndReasonArg {
    /// Explicit logout
    Logout,
    /// Session timed out
    Expired,
}

impl From<EndReasonArg> for EndReason {
    fn from(arg: EndReasonArg) -> Self {
        match arg {
            EndReasonArg::Logout => Self::Logout,
            EndReasonArg::Expired => Self::Expired,
        }
    }
}

impl SessionCommand {
    /// Execute the session command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;

        match self.action {
            SessionAction::Start => {
                let identity = resolve_identity(global, &manager)?;
                let session = manager.session_started(&identity)?;
                println!("{session}");
            }
            SessionAction::End { id, reason } => {
                let released = manager.session_ended(id, reason.into())?;
                report(global, &format!("Session {id} ended, released {released} reservation(s)"));
            }
        }

        Ok(())
    }
}
