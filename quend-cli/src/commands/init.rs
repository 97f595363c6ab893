//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the quend data directory and database.

use crate::error::CliError;
use crate::utils::{parse_callsign, report, resolve_data_dir, shorten_path, GlobalOptions};
use clap::Args;
use quend::database::DATABASE_FILE_NAME;
use quend::init::{init_data_dir, InitOptions};

/// Initialize quend data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    pub overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    pub with_config: bool,

    /// Register this callsign as the first admin
    #[arg(long, value_name = "CALLSIGN")]
    pub admin: Option<String>,

    /// Display name for the admin
    #[arg(long, value_name = "NAME", requires = "admin", default_value = "Admin")]
    pub admin_name: String,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The global `--data-dir` names the directory to create here, and
    /// `--disable-autoinit` is ignored.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize quend in: {}", shorten_path(&data_dir));

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if !db_path.exists() {
                println!("  - Create database: {}", db_path.display());
            } else if self.overwrite {
                println!("  - Replace existing database: {}", db_path.display());
            } else {
                println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                );
            }

            if let Some(ref admin) = self.admin {
                println!("  - Register admin {}", admin.trim().to_uppercase());
            }
            if self.with_config {
                println!("  - Create configuration file (unless one exists)");
            }
            return Ok(());
        }

        let mut options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        if let Some(ref admin) = self.admin {
            options = options.with_admin(parse_callsign(admin)?, self.admin_name.clone());
        }

        let result = init_data_dir(&options)?;

        report(
            global,
            &format!("Initialized quend in: {}", shorten_path(&result.data_dir)),
        );
        if result.data_dir_created {
            report(global, "  - Created data directory");
        }
        if result.database_created {
            report(
                global,
                if self.overwrite {
                    "  - Recreated database"
                } else {
                    "  - Created database"
                },
            );
        }
        if let Some(admin) = result.admin_created {
            report(global, &format!("  - Registered admin {admin}"));
        }
        if result.config_created {
            report(global, "  - Created default configuration file");
        } else if self.with_config {
            report(global, "  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
