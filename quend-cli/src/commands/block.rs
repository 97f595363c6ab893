//! Block, unblock and release commands.
//!
//! These are the operator-facing reservation commands. Each resolves the
//! caller from `--as` and the award from its id or name, then calls the
//! matching manager operation.

use crate::error::CliError;
use crate::utils::{
    open_manager, parse_callsign, report, resolve_award, resolve_identity, GlobalOptions,
};
use clap::Args;

/// Band, mode and award shared by the channel commands.
#[derive(Args)]
pub struct ChannelArgs {
    /// Award name, or id if no award has that name
    #[arg(long, short = 'a', value_name = "AWARD", env = "QUEND_AWARD")]
    pub award: String,

    /// Band, e.g. 20m
    pub band: String,

    /// Mode, e.g. CW
    pub mode: String,
}

/// Block a band/mode for yourself.
#[derive(Args)]
pub struct BlockCommand {
    #[command(flatten)]
    pub channel: ChannelArgs,
}

impl BlockCommand {
    /// Execute the block command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let identity = resolve_identity(global, &manager)?;
        let award = resolve_award(&manager, &self.channel.award)?;

        let outcome = manager.block(&identity, award, &self.channel.band, &self.channel.mode)?;
        let channel = outcome.reservation.channel();

        if outcome.unchanged {
            report(global, &format!("You already hold {channel}"));
        } else if let Some(previous) = outcome.superseded {
            report(global, &format!("Blocked {channel} (released {previous})"));
        } else {
            report(global, &format!("Blocked {channel}"));
        }
        Ok(())
    }
}

/// Release a band/mode you hold.
#[derive(Args)]
pub struct UnblockCommand {
    #[command(flatten)]
    pub channel: ChannelArgs,
}

impl UnblockCommand {
    /// Execute the unblock command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let identity = resolve_identity(global, &manager)?;
        let award = resolve_award(&manager, &self.channel.award)?;

        let released =
            manager.unblock(&identity, award, &self.channel.band, &self.channel.mode)?;
        report(
            global,
            if released {
                "Released"
            } else {
                "Nothing to release"
            },
        );
        Ok(())
    }
}

/// Release a band/mode held by anyone (admin).
#[derive(Args)]
pub struct ForceReleaseCommand {
    #[command(flatten)]
    pub channel: ChannelArgs,
}

impl ForceReleaseCommand {
    /// Execute the force-release command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let identity = resolve_identity(global, &manager)?;
        let award = resolve_award(&manager, &self.channel.award)?;

        let released =
            manager.force_release(&identity, award, &self.channel.band, &self.channel.mode)?;
        report(
            global,
            if released {
                "Released"
            } else {
                "Nothing to release"
            },
        );
        Ok(())
    }
}

/// Release every reservation of an operator.
#[derive(Args)]
pub struct ReleaseAllCommand {
    /// Operator whose reservations to release (default: yourself; others need admin)
    #[arg(long, value_name = "CALLSIGN")]
    pub operator: Option<String>,

    /// Only release within this award (name, or id if no award has that name)
    #[arg(long, short = 'a', value_name = "AWARD")]
    pub award: Option<String>,
}

impl ReleaseAllCommand {
    /// Execute the release-all command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let identity = resolve_identity(global, &manager)?;

        let target = match self.operator {
            Some(ref raw) => parse_callsign(raw)?,
            None => identity.callsign.clone(),
        };
        if target != identity.callsign {
            identity.require_admin("release another operator's reservations")?;
        }

        let award = self
            .award
            .as_deref()
            .map(|a| resolve_award(&manager, a))
            .transpose()?;

        let count = manager.release_all_for_operator(&target, award)?;
        if global.quiet {
            println!("{count}");
        } else {
            println!("Released {count} reservation(s) held by {target}");
        }
        Ok(())
    }
}
