//! fx-collector: Concurrent collection of delivery attempts.
//!
//! This crate provides the [`Collector`], which walks the Foxtrot API for
//! every configured distribution center and flattens the results into
//! [`DeliveryRow`]s.
//!
//! # Overview
//!
//! For each DC the collector:
//! - Fetches the routes scheduled on the run date
//! - Fetches each route's waypoints (at most `route_concurrency` routes at once)
//! - Fetches each waypoint's deliveries (at most `waypoint_concurrency` at once)
//! - Flattens deliveries and attempts into rows with [`flatten_deliveries`]
//!
//! DCs themselves run at most `dc_concurrency` at once. Branches share
//! nothing but the HTTP connection pool; each returns its own rows and the
//! caller merges them once the branch completes.
//!
//! # Example
//!
//! ```rust,no_run
//! use fx_collector::{Collector, CollectorConfig};
//! use fx_ingestion::{ApiConfig, FoxtrotSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FoxtrotSource::new(&ApiConfig::from_env()?)?;
//!     let config = CollectorConfig::from_env()?.with_dc_ids(["BO016", "BO77"]);
//!
//!     let collector = Collector::new(source, config)?;
//!     let collection = collector.collect().await;
//!
//!     for dc in &collection.dcs {
//!         println!("{}: {} rows", dc.dc_id, dc.rows);
//!     }
//!     Ok(())
//! }
//! ```

mod collector;
pub mod config;
mod error;
mod flatten;

pub use collector::{Collection, Collector, DcSummary};
pub use config::CollectorConfig;
pub use error::CollectorError;
pub use flatten::flatten_deliveries;

// Re-export commonly used types from dependencies for convenience
pub use fx_ingestion::{DeliverySource, FoxtrotSource, MockSource};
pub use fx_types::{DeliveryRow, BLANK};
