//! Main entry point for the quend CLI.
//!
//! This is the command-line interface for the quend band/mode reservation
//! manager. Operators block and unblock channels of an award; admins manage
//! awards, operators and stuck reservations.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _ = quend::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        as_operator: cli.as_operator,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Award(cmd) => cmd.execute(&global),
        cli::Command::Operator(cmd) => cmd.execute(&global),
        cli::Command::Block(cmd) => cmd.execute(&global),
        cli::Command::Unblock(cmd) => cmd.execute(&global),
        cli::Command::ForceRelease(cmd) => cmd.execute(&global),
        cli::Command::ReleaseAll(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Occupancy(cmd) => cmd.execute(&global),
        cli::Command::Stats(cmd) => cmd.execute(&global),
        cli::Command::Session(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
