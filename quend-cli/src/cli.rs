//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AwardCommand, BlockCommand, CompletionsCommand, ForceReleaseCommand, InitCommand,
    ListCommand, OccupancyCommand, OperatorCommand, ReleaseAllCommand, SessionCommand,
    ShowDataDirCommand, StatsCommand, UnblockCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for blocking band/mode combinations during award events.
#[derive(Parser)]
#[command(name = "quend")]
#[command(
    version,
    about = "Block band/mode combinations during amateur-radio award events",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "QUEND_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the store lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "QUEND_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "QUEND_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Callsign of the operator running the command
    #[arg(
        long = "as",
        value_name = "CALLSIGN",
        global = true,
        env = "QUEND_OPERATOR"
    )]
    pub as_operator: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize quend data directory and database
    Init(InitCommand),

    /// Manage awards
    Award(AwardCommand),

    /// Manage operators
    Operator(OperatorCommand),

    /// Block a band/mode for yourself
    Block(BlockCommand),

    /// Release a band/mode you hold
    Unblock(UnblockCommand),

    /// Release a band/mode held by anyone (admin)
    ForceRelease(ForceReleaseCommand),

    /// Release every reservation of an operator
    ReleaseAll(ReleaseAllCommand),

    /// List active reservations
    List(ListCommand),

    /// Show the band/mode grid of an award
    Occupancy(OccupancyCommand),

    /// Show system-wide counters
    Stats(StatsCommand),

    /// Start or end operator sessions
    Session(SessionCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
