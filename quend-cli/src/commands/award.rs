//! Award management commands.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, open_manager, report, resolve_award, resolve_identity, GlobalOptions,
    OutputFormat,
};
use clap::{Args, Subcommand};
use quend::Award;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 5] = ["id", "name", "active", "description", "created_at"];

/// Manage awards.
#[derive(Args)]
pub struct AwardCommand {
    #[command(subcommand)]
    pub action: AwardAction,
}

/// Award subcommands.
#[derive(Subcommand)]
pub enum AwardAction {
    /// Create a new, active award (admin)
    Create {
        /// Award name, usually the special callsign
        name: String,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List awards
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },

    /// Rename an award or change its description (admin)
    Update {
        /// Award name, or id if no award has that name
        award: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Accept new reservations for an award (admin)
    Activate {
        /// Award name, or id if no award has that name
        award: String,
    },

    /// Stop accepting new reservations for an award (admin)
    Deactivate {
        /// Award name, or id if no award has that name
        award: String,
    },

    /// Delete an award and all its reservations (admin)
    Delete {
        /// Award name, or id if no award has that name
        award: String,
    },
}

impl AwardCommand {
    /// Execute the award command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;

        match self.action {
            AwardAction::Create { name, description } => {
                let identity = resolve_identity(global, &manager)?;
                let award = manager.create_award(&identity, &name, &description)?;
                if global.quiet {
                    println!("{}", award.id);
                } else {
                    println!("Created award {} with id {}", award.name, award.id);
                }
            }
            AwardAction::List { format } => {
                let awards = manager.list_awards()?;
                write_awards(&awards, format)?;
            }
            AwardAction::Update {
                award,
                name,
                description,
            } => {
                if name.is_none() && description.is_none() {
                    return Err(CliError::InvalidArguments(
                        "nothing to update: pass --name and/or --description".into(),
                    ));
                }
                let identity = resolve_identity(global, &manager)?;
                let id = resolve_award(&manager, &award)?;
                let updated =
                    manager.update_award(&identity, id, name.as_deref(), description.as_deref())?;
                report(global, &format!("Award {id} is now {}", updated.name));
            }
            AwardAction::Activate { award } => {
                let identity = resolve_identity(global, &manager)?;
                let id = resolve_award(&manager, &award)?;
                manager.set_award_active(&identity, id, true)?;
                report(global, &format!("Award {id} is active"));
            }
            AwardAction::Deactivate { award } => {
                let identity = resolve_identity(global, &manager)?;
                let id = resolve_award(&manager, &award)?;
                manager.set_award_active(&identity, id, false)?;
                report(global, &format!("Award {id} is inactive"));
            }
            AwardAction::Delete { award } => {
                let identity = resolve_identity(global, &manager)?;
                let id = resolve_award(&manager, &award)?;
                let cascaded = manager.delete_award(&identity, id)?;
                report(
                    global,
                    &format!("Deleted award {id} and {cascaded} reservation(s)"),
                );
            }
        }

        Ok(())
    }
}

fn write_awards(awards: &[Award], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            let header_line = COLUMN_HEADERS
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(handle, "{header_line}")?;
            for award in awards {
                writeln!(
                    handle,
                    "{}\t{}\t{}\t{}\t{}",
                    award.id,
                    award.name,
                    if award.active { "yes" } else { "no" },
                    if award.description.is_empty() {
                        "-"
                    } else {
                        &award.description
                    },
                    format_timestamp(award.created_at),
                )?;
            }
        }
        OutputFormat::Json => {
            let json_data: Vec<serde_json::Value> = awards
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "id": a.id,
                        "name": a.name,
                        "active": a.active,
                        "description": a.description,
                        "created_at": format_timestamp(a.created_at),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut handle, &json_data)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(handle)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(handle);
            writer.write_record(COLUMN_HEADERS).map_err(super::csv_error)?;
            for a in awards {
                writer
                    .write_record([
                        a.id.to_string(),
                        a.name.clone(),
                        a.active.to_string(),
                        a.description.clone(),
                        format_timestamp(a.created_at),
                    ])
                    .map_err(super::csv_error)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
