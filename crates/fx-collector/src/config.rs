//! Collector configuration.
//!
//! # Environment Variables
//!
//! - `FOXTROT_DC_IDS`: comma-separated DC ids (default: [`DEFAULT_DC_IDS`])
//! - `FOXTROT_RUN_DATE`: `YYYY-MM-DD` date to export (default: today, local time)
//! - `FOXTROT_DC_CONCURRENCY`: DCs processed at once (default: all of them)
//! - `FOXTROT_ROUTE_CONCURRENCY`: routes per DC at once (default: 15)
//! - `FOXTROT_WAYPOINT_CONCURRENCY`: waypoints per route at once (default: 15)

use crate::error::CollectorError;
use chrono::NaiveDate;
use fx_ingestion::config::parse_var;
use fx_ingestion::IngestionError;

/// Distribution centers exported when none are configured.
pub const DEFAULT_DC_IDS: [&str; 11] = [
    "BO016", "BO77", "BO079", "BO009", "BO019", "BO020", "BO095", "BO100", "BO011", "BO088",
    "BO007",
];

pub const DEFAULT_ROUTE_CONCURRENCY: usize = 15;
pub const DEFAULT_WAYPOINT_CONCURRENCY: usize = 15;

/// Configuration for one collection run.
///
/// The run date is fixed when the config is built, so a run that crosses
/// midnight still queries a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// DCs to export, in submission order.
    pub dc_ids: Vec<String>,

    /// Date whose routes are fetched.
    pub run_date: NaiveDate,

    /// Bound on DCs in flight. `None` means one slot per DC.
    pub dc_concurrency: Option<usize>,

    /// Bound on routes in flight within one DC.
    pub route_concurrency: usize,

    /// Bound on delivery fetches in flight within one route.
    pub waypoint_concurrency: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl CollectorConfig {
    /// Default DCs and bounds for the given date.
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            dc_ids: DEFAULT_DC_IDS.iter().map(|s| s.to_string()).collect(),
            run_date,
            dc_concurrency: None,
            route_concurrency: DEFAULT_ROUTE_CONCURRENCY,
            waypoint_concurrency: DEFAULT_WAYPOINT_CONCURRENCY,
        }
    }

    /// Load the config from process environment variables.
    pub fn from_env() -> Result<Self, CollectorError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not parse or the result fails
    /// [`CollectorConfig::validate`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CollectorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_date = match lookup("FOXTROT_RUN_DATE").filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<NaiveDate>().map_err(|e| {
                CollectorError::InvalidConfig(format!("FOXTROT_RUN_DATE={:?}: {}", raw, e))
            })?,
            None => chrono::Local::now().date_naive(),
        };

        let mut config = Self::new(run_date);

        if let Some(raw) = lookup("FOXTROT_DC_IDS") {
            config = config.with_dc_ids(parse_dc_ids(&raw));
        }

        if lookup("FOXTROT_DC_CONCURRENCY").is_some_and(|s| !s.trim().is_empty()) {
            config.dc_concurrency = Some(parse_bound(&lookup, "FOXTROT_DC_CONCURRENCY", 0)?);
        }
        config.route_concurrency = parse_bound(
            &lookup,
            "FOXTROT_ROUTE_CONCURRENCY",
            DEFAULT_ROUTE_CONCURRENCY,
        )?;
        config.waypoint_concurrency = parse_bound(
            &lookup,
            "FOXTROT_WAYPOINT_CONCURRENCY",
            DEFAULT_WAYPOINT_CONCURRENCY,
        )?;

        config.validate()?;
        Ok(config)
    }

    pub fn with_dc_ids<I, S>(mut self, dc_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dc_ids = dc_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dc_concurrency(mut self, limit: usize) -> Self {
        self.dc_concurrency = Some(limit);
        self
    }

    pub fn with_route_concurrency(mut self, limit: usize) -> Self {
        self.route_concurrency = limit;
        self
    }

    pub fn with_waypoint_concurrency(mut self, limit: usize) -> Self {
        self.waypoint_concurrency = limit;
        self
    }

    /// Effective bound on DCs in flight.
    pub fn dc_limit(&self) -> usize {
        self.dc_concurrency.unwrap_or(self.dc_ids.len()).max(1)
    }

    /// Check the config can produce a run.
    ///
    /// A zero bound would stall the fan-out, and an empty DC list can
    /// only produce an empty file.
    pub fn validate(&self) -> Result<(), CollectorError> {
        if self.dc_ids.is_empty() {
            return Err(CollectorError::InvalidConfig("no DC ids configured".into()));
        }
        if self.dc_concurrency == Some(0) {
            return Err(CollectorError::InvalidConfig(
                "DC concurrency must be at least 1".into(),
            ));
        }
        if self.route_concurrency == 0 {
            return Err(CollectorError::InvalidConfig(
                "route concurrency must be at least 1".into(),
            ));
        }
        if self.waypoint_concurrency == 0 {
            return Err(CollectorError::InvalidConfig(
                "waypoint concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parse a concurrency bound, reporting failures as collector config errors.
fn parse_bound<F>(lookup: &F, key: &str, default: usize) -> Result<usize, CollectorError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_var(lookup, key, default).map_err(|e| match e {
        IngestionError::Config(msg) => CollectorError::InvalidConfig(msg),
        other => CollectorError::InvalidConfig(other.to_string()),
    })
}

/// Split a comma-separated DC list, dropping blanks.
fn parse_dc_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
