//! List command implementation.
//!
//! This module implements the `list` command, which displays active
//! reservations in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    format_timestamp, open_manager, parse_callsign, resolve_award, GlobalOptions, OutputFormat,
};
use clap::Args;
use quend::Reservation;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "award", "band", "mode", "operator", "created_at"];

/// List active reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "QUEND_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Only list one award (name, or id if no award has that name)
    #[arg(long, short = 'a', value_name = "AWARD")]
    pub award: Option<String>,

    /// Only list one operator's reservations
    #[arg(long, value_name = "CALLSIGN")]
    pub operator: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;

        let award = self
            .award
            .as_deref()
            .map(|a| resolve_award(&manager, a))
            .transpose()?;

        let reservations = match (self.operator.as_deref(), award) {
            (Some(raw), award) => {
                let callsign = parse_callsign(raw)?;
                manager.operator_reservations(&callsign, award)?
            }
            (None, Some(award)) => manager.list_active(award)?,
            (None, None) => manager.list_all()?,
        };

        match self.format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            res.id(),
            res.award_id(),
            res.channel().band(),
            res.channel().mode(),
            res.operator(),
            format_timestamp(res.created_at()),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "award": r.award_id(),
                "band": r.channel().band(),
                "mode": r.channel().mode(),
                "operator": r.operator(),
                "created_at": format_timestamp(r.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(super::csv_error)?;

    for res in reservations {
        writer
            .write_record([
                res.id().to_string(),
                res.award_id().to_string(),
                res.channel().band().to_string(),
                res.channel().mode().to_string(),
                res.operator().to_string(),
                format_timestamp(res.created_at()),
            ])
            .map_err(super::csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
