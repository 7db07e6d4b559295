//! Mock data source for testing.
//!
//! `MockSource` implements `DeliverySource` with canned responses, allowing
//! the fan-out logic to be tested without network calls.
//!
//! Any endpoint that was not configured answers `None`, which is exactly
//! what the real source returns after a failed request. Tests simulate a
//! broken branch by simply leaving it out.
//!
//! # Usage
//!
//! ```rust
//! use fx_ingestion::{DeliverySource, MockSource};
//! use fx_types::{Delivery, Route, Waypoint};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockSource::new()
//!     .with_routes("BO016", vec![Route::new("R1", "RUTA 1")])
//!     .with_waypoints("BO016", "R1", vec![Waypoint::new("W1", "C1")])
//!     .with_deliveries("BO016", "R1", "W1", vec![Delivery::new("DEL_P1", ["DELIVERED"])]);
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! assert!(mock.get_routes("BO016", date).await.is_some());
//! assert!(mock.get_routes("BO77", date).await.is_none());
//! # }
//! ```

use crate::DeliverySource;
use chrono::NaiveDate;
use fx_types::api::{DeliveriesResponse, RoutesResponse, WaypointsResponse};
use fx_types::{Delivery, Route, Waypoint};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock data source for testing.
///
/// Responses are cloned on every call. Counters are shared between clones
/// so a test can keep a handle while the collector owns the source.
#[derive(Default, Clone)]
pub struct MockSource {
    routes: HashMap<String, RoutesResponse>,
    waypoints: HashMap<(String, String), WaypointsResponse>,
    deliveries: HashMap<(String, String, String), DeliveriesResponse>,

    /// Artificial delay applied to every call.
    latency: Duration,

    stats: Arc<CallStats>,
}

#[derive(Default)]
struct CallStats {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes to return for `dc_id`, whatever the date.
    pub fn with_routes(mut self, dc_id: &str, routes: Vec<Route>) -> Self {
        self.routes.insert(dc_id.to_string(), routes.into());
        self
    }

    /// Raw routes response, for payloads with missing `data` or lists.
    pub fn with_routes_response(mut self, dc_id: &str, response: RoutesResponse) -> Self {
        self.routes.insert(dc_id.to_string(), response);
        self
    }

    pub fn with_waypoints(mut self, dc_id: &str, route_id: &str, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints
            .insert((dc_id.to_string(), route_id.to_string()), waypoints.into());
        self
    }

    pub fn with_waypoints_response(
        mut self,
        dc_id: &str,
        route_id: &str,
        response: WaypointsResponse,
    ) -> Self {
        self.waypoints
            .insert((dc_id.to_string(), route_id.to_string()), response);
        self
    }

    pub fn with_deliveries(
        mut self,
        dc_id: &str,
        route_id: &str,
        waypoint_id: &str,
        deliveries: Vec<Delivery>,
    ) -> Self {
        self.deliveries.insert(
            (
                dc_id.to_string(),
                route_id.to_string(),
                waypoint_id.to_string(),
            ),
            deliveries.into(),
        );
        self
    }

    pub fn with_deliveries_response(
        mut self,
        dc_id: &str,
        route_id: &str,
        waypoint_id: &str,
        response: DeliveriesResponse,
    ) -> Self {
        self.deliveries.insert(
            (
                dc_id.to_string(),
                route_id.to_string(),
                waypoint_id.to_string(),
            ),
            response,
        );
        self
    }

    /// Delay every call, so concurrent calls overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Total number of calls made so far.
    pub fn calls(&self) -> usize {
        self.stats.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were in progress at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond<T: Clone>(&self, response: Option<&T>) -> Option<T> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        response.cloned()
    }
}

impl DeliverySource for MockSource {
    async fn get_routes(&self, dc_id: &str, _date: NaiveDate) -> Option<RoutesResponse> {
        self.respond(self.routes.get(dc_id)).await
    }

    async fn get_waypoints(&self, dc_id: &str, route_id: &str) -> Option<WaypointsResponse> {
        let key = (dc_id.to_string(), route_id.to_string());
        self.respond(self.waypoints.get(&key)).await
    }

    async fn get_deliveries(
        &self,
        dc_id: &str,
        route_id: &str,
        waypoint_id: &str,
    ) -> Option<DeliveriesResponse> {
        let key = (
            dc_id.to_string(),
            route_id.to_string(),
            waypoint_id.to_string(),
        );
        self.respond(self.deliveries.get(&key)).await
    }
}
