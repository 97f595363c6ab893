//! Operator directory commands.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, open_manager, parse_callsign, report, resolve_identity, GlobalOptions,
    OutputFormat,
};
use clap::{Args, Subcommand};
use quend::Operator;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 4] = ["callsign", "name", "admin", "created_at"];

/// Manage operators.
#[derive(Args)]
pub struct OperatorCommand {
    #[command(subcommand)]
    pub action: OperatorAction,
}

/// Operator subcommands.
#[derive(Subcommand)]
pub enum OperatorAction {
    /// Register an operator (admin, except for the very first operator)
    Add {
        /// Operator callsign
        callsign: String,

        /// Display name
        name: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },

    /// List registered operators
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },

    /// Remove an operator, releasing all their reservations (admin)
    Remove {
        /// Operator callsign
        callsign: String,
    },

    /// Grant admin rights (admin)
    Promote {
        /// Operator callsign
        callsign: String,
    },

    /// Revoke admin rights (admin)
    Demote {
        /// Operator callsign
        callsign: String,
    },
}

impl OperatorCommand {
    /// Execute the operator command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;

        match self.action {
            OperatorAction::Add {
                callsign,
                name,
                admin,
            } => {
                let callsign = parse_callsign(&callsign)?;
                // The first operator bootstraps the directory and is always an admin
                let operator = match manager.register_first_admin(&callsign, &name)? {
                    Some(operator) => operator,
                    None => {
                        resolve_identity(global, &manager)?.require_admin("register operators")?;
                        manager.register_operator(&callsign, &name, admin)?
                    }
                };
                report(
                    global,
                    &format!(
                        "Registered {}{}",
                        operator.callsign,
                        if operator.is_admin { " (admin)" } else { "" }
                    ),
                );
            }
            OperatorAction::List { format } => {
                let operators = manager.list_operators()?;
                write_operators(&operators, format)?;
            }
            OperatorAction::Remove { callsign } => {
                let identity = resolve_identity(global, &manager)?;
                let callsign = parse_callsign(&callsign)?;
                let released = manager.remove_operator(&identity, &callsign)?;
                report(
                    global,
                    &format!("Removed {callsign} and released {released} reservation(s)"),
                );
            }
            OperatorAction::Promote { callsign } => {
                let identity = resolve_identity(global, &manager)?;
                let callsign = parse_callsign(&callsign)?;
                manager.set_admin(&identity, &callsign, true)?;
                report(global, &format!("{callsign} is now an admin"));
            }
            OperatorAction::Demote { callsign } => {
                let identity = resolve_identity(global, &manager)?;
                let callsign = parse_callsign(&callsign)?;
                manager.set_admin(&identity, &callsign, false)?;
                report(global, &format!("{callsign} is no longer an admin"));
            }
        }

        Ok(())
    }
}

fn write_operators(operators: &[Operator], format: OutputFormat) -> Result<(), CliError> {
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
            for op in operators {
                writeln!(
                    handle,
                    "{}\t{}\t{}\t{}",
                    op.callsign,
                    op.name,
                    if op.is_admin { "yes" } else { "no" },
                    format_timestamp(op.created_at),
                )?;
            }
        }
        OutputFormat::Json => {
            let json_data: Vec<serde_json::Value> = operators
                .iter()
                .map(|op| {
                    serde_json::json!({
                        "callsign": op.callsign,
                        "name": op.name,
                        "admin": op.is_admin,
                        "created_at": format_timestamp(op.created_at),
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
            for op in operators {
                writer
                    .write_record([
                        op.callsign.to_string(),
                        op.name.clone(),
                        op.is_admin.to_string(),
                        format_timestamp(op.created_at),
                    ])
                    .map_err(super::csv_error)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
