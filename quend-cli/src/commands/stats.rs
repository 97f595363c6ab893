//! Stats command implementation.

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions, OutputFormat};
use clap::Args;
use std::io::Write;

/// Show system-wide counters.
#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let stats = manager.stats()?;

        let rows = [
            ("operators", stats.operators),
            ("admins", stats.admins),
            ("awards", stats.awards),
            ("active_awards", stats.active_awards),
            ("active_reservations", stats.active_reservations),
            ("holding_operators", stats.holding_operators),
            ("open_sessions", stats.open_sessions),
        ];

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.format {
            OutputFormat::Table => {
                for (name, value) in rows {
                    writeln!(handle, "{name:<20} {value}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &stats)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                writeln!(handle)?;
            }
            OutputFormat::Csv | OutputFormat::Tsv => {
                let delimiter = if self.format == OutputFormat::Csv { b',' } else { b'\t' };
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(delimiter)
                    .from_writer(handle);
                writer
                    .write_record(["counter", "value"])
                    .map_err(super::csv_error)?;
                for (name, value) in rows {
                    writer
                        .write_record([name.to_string(), value.to_string()])
                        .map_err(super::csv_error)?;
                }
                writer.flush()?;
            }
        }

        Ok(())
    }
}
