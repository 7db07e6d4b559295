//! CSV export of flattened delivery rows.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fx_export::{export_csv, ExportConfig, Table};
//!
//! # fn main() -> Result<(), fx_export::ExportError> {
//! let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let path = export_csv(&ExportConfig::new("out"), date, &Table::default())?;
//! assert!(path.ends_with("entregas_2026-10-19.csv"));
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod table;
mod writer;

pub use config::{file_name, ExportConfig};
pub use error::ExportError;
pub use table::Table;
pub use writer::{export_csv, write_csv, BOM};
