//! Output configuration.
//!
//! # Environment Variables
//!
//! - `OUTPUT_DIR`: directory the CSV is written to (default: `.`)

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Where the output file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Load the config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary key lookup. A blank value falls
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("OUTPUT_DIR").filter(|s| !s.trim().is_empty()) {
            Some(dir) => Self::new(dir.trim()),
            None => Self::default(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the file for `date`.
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir.join(file_name(date))
    }
}

/// `entregas_<YYYY-MM-DD>.csv`
pub fn file_name(date: NaiveDate) -> String {
    format!("entregas_{}.csv", date.format("%Y-%m-%d"))
}
