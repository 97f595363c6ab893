//! Build script for quend-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("quend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Block band/mode combinations during amateur-radio award events")
        .long_about(
            "Command-line tool for coordinating which operator holds which band/mode of an award",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("QUEND_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the store lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("QUEND_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("QUEND_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .help("Callsign of the operator running the command")
                .value_name("CALLSIGN")
                .global(true)
                .env("QUEND_OPERATOR"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize quend data directory and database")
                .long_about("Create the database, an optional config file and the first admin"),
            Command::new("award")
                .about("Manage awards")
                .long_about("Create, list, update, activate, deactivate and delete awards"),
            Command::new("operator")
                .about("Manage operators")
                .long_about("Register, list, promote, demote and remove operators"),
            Command::new("block")
                .about("Block a band/mode for yourself")
                .long_about(
                    "Take a band/mode of an award, releasing any channel you held before",
                ),
            Command::new("unblock")
                .about("Release a band/mode you hold")
                .long_about("Give back a band/mode you hold in an award"),
            Command::new("force-release")
                .about("Release a band/mode held by anyone (admin)")
                .long_about("Clear a stuck reservation regardless of its holder"),
            Command::new("release-all")
                .about("Release every reservation of an operator")
                .long_about("Release all reservations of yourself or, as admin, of another operator"),
            Command::new("list")
                .about("List active reservations")
                .long_about("Display active reservations in various formats"),
            Command::new("occupancy")
                .about("Show the band/mode grid of an award")
                .long_about("Display which channels of an award are held and by whom"),
            Command::new("stats")
                .about("Show system-wide counters")
                .long_about("Display operator, award, reservation and session counts"),
            Command::new("session")
                .about("Start or end operator sessions")
                .long_about("Open a session on login; ending it releases the operator's reservations"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the quend data directory"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a quend configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main quend.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("quend.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
