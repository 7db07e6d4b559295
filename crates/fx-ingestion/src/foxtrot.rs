//! Foxtrot data source backed by [`ApiClient`].
//!
//! Builds the three endpoint URLs and delegates to
//! [`ApiClient::fetch_json`], so every failure is already logged and
//! reported as `None` by the time it reaches the caller.
//!
//! Path segments are appended through `Url::path_segments_mut`, which
//! percent-encodes ids containing `/`, spaces or other reserved characters.

use crate::api_client::ApiClient;
use crate::config::ApiConfig;
use crate::error::IngestionError;
use crate::DeliverySource;
use chrono::NaiveDate;
use fx_types::api::{DeliveriesResponse, RoutesResponse, WaypointsResponse};
use url::Url;

/// Production data source for the Foxtrot API.
///
/// # Example
///
/// ```rust,no_run
/// use fx_ingestion::{ApiConfig, DeliverySource, FoxtrotSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = FoxtrotSource::new(&ApiConfig::from_env()?)?;
///     let today = chrono::Local::now().date_naive();
///
///     if let Some(resp) = source.get_routes("BO016", today).await {
///         println!("Got {} routes", resp.into_routes().len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FoxtrotSource {
    client: ApiClient,
    base_url: Url,
}

impl FoxtrotSource {
    /// Create a source for the configured API.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::new`] errors.
    pub fn new(config: &ApiConfig) -> Result<Self, IngestionError> {
        Ok(Self {
            client: ApiClient::new(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// `{base}/dcs/{dc_id}/routes/find_by_date/{YYYY-MM-DD}`
    pub fn routes_url(&self, dc_id: &str, date: NaiveDate) -> Url {
        let date = date.format("%Y-%m-%d").to_string();
        self.endpoint(&["dcs", dc_id, "routes", "find_by_date", &date])
    }

    /// `{base}/dcs/{dc_id}/routes/{route_id}/waypoints`
    pub fn waypoints_url(&self, dc_id: &str, route_id: &str) -> Url {
        self.endpoint(&["dcs", dc_id, "routes", route_id, "waypoints"])
    }

    /// `{base}/dcs/{dc_id}/routes/{route_id}/waypoints/{waypoint_id}/deliveries`
    pub fn deliveries_url(&self, dc_id: &str, route_id: &str, waypoint_id: &str) -> Url {
        self.endpoint(&[
            "dcs",
            dc_id,
            "routes",
            route_id,
            "waypoints",
            waypoint_id,
            "deliveries",
        ])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `ApiConfig::with_base_url` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl DeliverySource for FoxtrotSource {
    async fn get_routes(&self, dc_id: &str, date: NaiveDate) -> Option<RoutesResponse> {
        self.client.fetch_json(&self.routes_url(dc_id, date)).await
    }

    async fn get_waypoints(&self, dc_id: &str, route_id: &str) -> Option<WaypointsResponse> {
        self.client
            .fetch_json(&self.waypoints_url(dc_id, route_id))
            .await
    }

    async fn get_deliveries(
        &self,
        dc_id: &str,
        route_id: &str,
        waypoint_id: &str,
    ) -> Option<DeliveriesResponse> {
        self.client
            .fetch_json(&self.deliveries_url(dc_id, route_id, waypoint_id))
            .await
    }
}
