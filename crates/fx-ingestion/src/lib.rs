//! # fx-ingestion
//!
//! Ingestion layer for the Foxtrot delivery API.
//!
//! This crate provides a [`DeliverySource`] trait over the three endpoints
//! the export walks (routes by date, waypoints of a route, deliveries of a
//! waypoint), plus the HTTP implementation and a mock.
//!
//! ## Design Principles
//!
//! - **No result instead of errors**: every fetch returns `Option`. Network
//!   errors, non-2xx statuses and undecodable bodies are logged by the
//!   [`ApiClient`] and become `None`, so a failing endpoint only affects its
//!   own branch of the fan-out.
//!
//! - **Typed payloads**: responses decode into the optional schemas of
//!   [`fx_types::api`]; missing fields are substituted there.
//!
//! - **Zero-cost async**: native async trait methods (Rust 1.75+), no boxing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fx_ingestion::{ApiConfig, DeliverySource, FoxtrotSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("my-token");
//!     let source = FoxtrotSource::new(&config)?;
//!
//!     let waypoints = source
//!         .get_waypoints("BO016", "12345")
//!         .await
//!         .map(|r| r.into_waypoints())
//!         .unwrap_or_default();
//!
//!     println!("Fetched {} waypoints", waypoints.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! 500, 502, 503 and 504 are retried up to [`RetryPolicy::max_retries`] times
//! with exponential backoff. Nothing else is retried.

mod api_client;
pub mod config;
pub mod error;
mod foxtrot;
mod mock;

pub use api_client::ApiClient;
pub use config::{ApiConfig, RetryPolicy};
pub use error::IngestionError;
pub use foxtrot::FoxtrotSource;
pub use mock::MockSource;

use chrono::NaiveDate;
use fx_types::api::{DeliveriesResponse, RoutesResponse, WaypointsResponse};

/// Data source abstraction for the Foxtrot API.
///
/// ## Implementors
///
/// - [`FoxtrotSource`]: Production implementation over HTTP
/// - [`MockSource`]: Test implementation with canned responses
///
/// ## Why `Send + Sync`?
///
/// A single source is borrowed by every concurrent branch of the fan-out.
pub trait DeliverySource: Send + Sync {
    /// Routes scheduled for a DC on `date`.
    ///
    /// `None` means the request failed; an empty route list is `Some`.
    fn get_routes(
        &self,
        dc_id: &str,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Option<RoutesResponse>> + Send;

    /// Waypoints (stops) of a route.
    fn get_waypoints(
        &self,
        dc_id: &str,
        route_id: &str,
    ) -> impl std::future::Future<Output = Option<WaypointsResponse>> + Send;

    /// Deliveries, with their attempts, at one waypoint.
    fn get_deliveries(
        &self,
        dc_id: &str,
        route_id: &str,
        waypoint_id: &str,
    ) -> impl std::future::Future<Output = Option<DeliveriesResponse>> + Send;
}
