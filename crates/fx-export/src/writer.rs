//! CSV writer.
//!
//! Output is UTF-8 with a leading byte order mark so spreadsheet tools
//! detect the encoding, comma-separated, with a header row and no index
//! column.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::table::Table;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// UTF-8 byte order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `table` as CSV to `writer`, BOM first.
pub fn write_csv<W: Write>(mut writer: W, table: &Table) -> Result<(), ExportError> {
    writer.write_all(BOM)?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for record in table.records() {
        wtr.write_record(record)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Write `table` to `entregas_<date>.csv` under the configured directory,
/// creating the directory if needed. Returns the path written.
pub fn export_csv(
    config: &ExportConfig,
    date: NaiveDate,
    table: &Table,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(config.output_dir())?;

    let path = config.output_path(date);
    debug!("Writing {} rows to {}", table.len(), path.display());

    let file = File::create(&path)?;
    write_csv(BufWriter::new(file), table)?;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}
