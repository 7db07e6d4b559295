//! Core collector implementation.
//!
//! The `Collector` walks DC → route → waypoint → deliveries with a bounded
//! fan-out at each level and returns flat rows.
//!
//! # Empty vs failed responses
//!
//! | level      | fetch failed | empty list          |
//! |------------|--------------|---------------------|
//! | routes     | no rows      | no rows             |
//! | waypoints  | no rows      | one sentinel row    |
//! | deliveries | no rows      | one sentinel row    |
//!
//! A DC with no routes that day is not recorded; a route without stops or a
//! stop without deliveries is.

use crate::config::CollectorConfig;
use crate::error::CollectorError;
use crate::flatten::flatten_deliveries;
use futures::stream::{self, StreamExt};
use fx_ingestion::DeliverySource;
use fx_types::{DeliveryRow, Route, RowContext, Waypoint};
use std::time::Instant;

/// Per-DC outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcSummary {
    pub dc_id: String,
    pub rows: usize,
}

/// Result of [`Collector::collect`].
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// All rows, in completion order.
    pub rows: Vec<DeliveryRow>,

    /// One entry per configured DC, in completion order.
    pub dcs: Vec<DcSummary>,
}

/// Fetches and flattens delivery attempts for every configured DC.
///
/// # Example
///
/// ```rust,no_run
/// use fx_collector::{Collector, CollectorConfig};
/// use fx_ingestion::{ApiConfig, FoxtrotSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = FoxtrotSource::new(&ApiConfig::from_env()?)?;
///     let collector = Collector::new(source, CollectorConfig::default())?;
///
///     let collection = collector.collect().await;
///     println!("Got {} rows", collection.rows.len());
///     Ok(())
/// }
/// ```
pub struct Collector<S> {
    source: S,
    config: CollectorConfig,
}

impl<S: DeliverySource> Collector<S> {
    /// Create a collector over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::InvalidConfig`] if the config fails
    /// [`CollectorConfig::validate`].
    pub fn new(source: S, config: CollectorConfig) -> Result<Self, CollectorError> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Process every configured DC and merge their rows.
    ///
    /// At most [`CollectorConfig::dc_limit`] DCs are in flight at once.
    /// Never fails; failed branches simply contribute fewer rows.
    pub async fn collect(&self) -> Collection {
        let started = Instant::now();
        tracing::info!(
            "Collecting {} DCs for {} (dc limit {}, route limit {}, waypoint limit {})",
            self.config.dc_ids.len(),
            self.config.run_date,
            self.config.dc_limit(),
            self.config.route_concurrency,
            self.config.waypoint_concurrency
        );

        let mut collection = Collection::default();
        let mut dcs = stream::iter(&self.config.dc_ids)
            .map(|dc_id| async move { (dc_id, self.process_dc(dc_id).await) })
            .buffer_unordered(self.config.dc_limit());

        while let Some((dc_id, rows)) = dcs.next().await {
            tracing::info!("DC {} finished with {} rows", dc_id, rows.len());
            collection.dcs.push(DcSummary {
                dc_id: dc_id.clone(),
                rows: rows.len(),
            });
            collection.rows.extend(rows);
        }

        tracing::info!(
            "Collected {} rows from {} DCs in {:.1?}",
            collection.rows.len(),
            collection.dcs.len(),
            started.elapsed()
        );
        collection
    }

    /// Rows for one DC on the run date.
    ///
    /// A failed or empty routes response gives no rows. Otherwise routes are
    /// processed with at most `route_concurrency` in flight.
    pub async fn process_dc(&self, dc_id: &str) -> Vec<DeliveryRow> {
        let Some(response) = self.source.get_routes(dc_id, self.config.run_date).await else {
            return Vec::new();
        };

        let routes = response.into_routes();
        tracing::debug!("DC {}: {} routes", dc_id, routes.len());

        let mut rows = Vec::new();
        let mut batches = stream::iter(&routes)
            .map(|route| self.process_route(dc_id, route))
            .buffer_unordered(self.config.route_concurrency);

        while let Some(batch) = batches.next().await {
            rows.extend(batch);
        }
        rows
    }

    /// Rows for one route.
    ///
    /// A failed waypoints fetch gives no rows; an empty list gives one
    /// sentinel row carrying `dc_id` and the route name. Otherwise deliveries
    /// are fetched with at most `waypoint_concurrency` in flight.
    pub async fn process_route(&self, dc_id: &str, route: &Route) -> Vec<DeliveryRow> {
        let Some(response) = self.source.get_waypoints(dc_id, route.id()).await else {
            return Vec::new();
        };

        let waypoints = response.into_waypoints();
        if waypoints.is_empty() {
            return vec![RowContext::for_route(dc_id, route.name()).blank_row()];
        }

        let mut rows = Vec::new();
        let mut batches = stream::iter(&waypoints)
            .map(|waypoint| self.fetch_deliveries(dc_id, route, waypoint))
            .buffer_unordered(self.config.waypoint_concurrency);

        while let Some(batch) = batches.next().await {
            rows.extend(batch);
        }
        rows
    }

    /// Rows for one waypoint.
    ///
    /// A failed fetch gives no rows; otherwise see [`flatten_deliveries`].
    pub async fn fetch_deliveries(
        &self,
        dc_id: &str,
        route: &Route,
        waypoint: &Waypoint,
    ) -> Vec<DeliveryRow> {
        let Some(response) = self
            .source
            .get_deliveries(dc_id, route.id(), waypoint.waypoint_id())
            .await
        else {
            return Vec::new();
        };

        let ctx = RowContext::new(dc_id, route.name(), waypoint.customer_id());
        flatten_deliveries(&ctx, &response.into_deliveries())
    }
}
