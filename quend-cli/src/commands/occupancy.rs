//! Occupancy command implementation.
//!
//! Shows the band × mode grid of one award with the holder of each cell.

use crate::error::CliError;
use crate::utils::{open_manager, resolve_award, GlobalOptions};
use clap::{Args, ValueEnum};
use quend::{ChannelStatus, ResourceCatalog};
use std::io::Write;

/// Show which channels of an award are held and by whom.
#[derive(Args)]
pub struct OccupancyCommand {
    /// Award name, or id if no award has that name
    #[arg(long, short = 'a', value_name = "AWARD", env = "QUEND_AWARD")]
    pub award: String,

    /// Output format
    #[arg(long, value_enum, default_value = "grid", ignore_case = true)]
    pub format: OccupancyFormat,

    /// Only show free channels
    #[arg(long)]
    pub free: bool,
}

/// Output format for the occupancy command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OccupancyFormat {
    /// One row per band, one column per mode
    Grid,
    /// One line per channel
    Lines,
    /// JSON array of channel statuses
    Json,
}

impl OccupancyCommand {
    /// Execute the occupancy command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(global)?;
        let award = resolve_award(&manager, &self.award)?;

        let mut cells = manager.occupancy(award)?;
        if self.free {
            cells.retain(|c| c.holder.is_none());
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.format {
            OccupancyFormat::Grid if !self.free => {
                write_grid(&mut handle, manager.catalog(), &cells)?;
            }
            OccupancyFormat::Grid | OccupancyFormat::Lines => {
                for cell in &cells {
                    let holder = cell
                        .holder
                        .as_ref()
                        .map_or_else(|| "free".to_string(), ToString::to_string);
                    writeln!(handle, "{}\t{holder}", cell.channel)?;
                }
            }
            OccupancyFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &cells)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                writeln!(handle)?;
            }
        }

        Ok(())
    }
}

/// Writes one row per band with the holder's callsign (or `-`) per mode.
///
/// Cells outside the catalog grid are listed after it.
fn write_grid(
    out: &mut impl Write,
    catalog: &ResourceCatalog,
    cells: &[ChannelStatus],
) -> Result<(), CliError> {
    writeln!(out, "BAND\t{}", catalog.modes().join("\t"))?;

    let grid_len = catalog.len().min(cells.len());
    let (grid, extra) = cells.split_at(grid_len);
    for row in grid.chunks(catalog.modes().len().max(1)) {
        let marks: Vec<String> = row
            .iter()
            .map(|c| {
                c.holder
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |h| h.callsign.to_string())
            })
            .collect();
        writeln!(out, "{}\t{}", row[0].channel.band(), marks.join("\t"))?;
    }

    for cell in extra {
        if let Some(holder) = &cell.holder {
            writeln!(out, "{} (not configured)\t{}", cell.channel, holder.callsign)?;
        }
    }

    Ok(())
}
