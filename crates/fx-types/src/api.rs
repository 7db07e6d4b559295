//! Response schemas for the Foxtrot API.
//!
//! Every endpoint wraps its payload as `{ "data": { "<list>": [...] } }`.
//! Any level of that nesting may be missing or `null` upstream, so every
//! field is optional here and defaults are substituted by the accessor
//! methods rather than at each call site.
//!
//! Identifiers are accepted as JSON strings or numbers and normalized to
//! `String`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::row::{or_blank, BLANK};

/// Top-level response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Payload of `GET /dcs/{dc}/routes/find_by_date/{date}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutesData {
    #[serde(default)]
    pub routes: Option<Vec<Route>>,
}

/// Payload of `GET /dcs/{dc}/routes/{route}/waypoints`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaypointsData {
    #[serde(default)]
    pub waypoints: Option<Vec<Waypoint>>,
}

/// Payload of `GET /dcs/{dc}/routes/{route}/waypoints/{waypoint}/deliveries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveriesData {
    #[serde(default)]
    pub deliveries: Option<Vec<Delivery>>,
}

pub type RoutesResponse = Envelope<RoutesData>;
pub type WaypointsResponse = Envelope<WaypointsData>;
pub type DeliveriesResponse = Envelope<DeliveriesData>;

impl<T> Envelope<T> {
    pub fn with_data(data: T) -> Self {
        Self { data: Some(data) }
    }
}

impl From<Vec<Route>> for RoutesResponse {
    fn from(routes: Vec<Route>) -> Self {
        Self::with_data(RoutesData {
            routes: Some(routes),
        })
    }
}

impl From<Vec<Waypoint>> for WaypointsResponse {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self::with_data(WaypointsData {
            waypoints: Some(waypoints),
        })
    }
}

impl From<Vec<Delivery>> for DeliveriesResponse {
    fn from(deliveries: Vec<Delivery>) -> Self {
        Self::with_data(DeliveriesData {
            deliveries: Some(deliveries),
        })
    }
}

impl RoutesResponse {
    /// Routes in the response; empty when `data` or `routes` is absent.
    pub fn into_routes(self) -> Vec<Route> {
        self.data.and_then(|d| d.routes).unwrap_or_default()
    }
}

impl WaypointsResponse {
    /// Waypoints in the response; empty when `data` or `waypoints` is absent.
    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.data.and_then(|d| d.waypoints).unwrap_or_default()
    }
}

impl DeliveriesResponse {
    /// Deliveries in the response; empty when `data` or `deliveries` is absent.
    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.data.and_then(|d| d.deliveries).unwrap_or_default()
    }
}

/// A route scheduled for a DC on a given date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl Route {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    pub fn id(&self) -> &str {
        or_blank(self.id.as_deref())
    }

    pub fn name(&self) -> &str {
        or_blank(self.name.as_deref())
    }
}

/// A stop on a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Waypoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub waypoint_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: Option<String>,
}

impl Waypoint {
    pub fn new(waypoint_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            waypoint_id: Some(waypoint_id.into()),
            customer_id: Some(customer_id.into()),
        }
    }

    pub fn waypoint_id(&self) -> &str {
        or_blank(self.waypoint_id.as_deref())
    }

    pub fn customer_id(&self) -> &str {
        or_blank(self.customer_id.as_deref())
    }
}

/// One item shipped to a waypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Delivery {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub attempts: Option<Vec<Attempt>>,
}

impl Delivery {
    /// A delivery with one attempt per status.
    pub fn new<S: Into<String>>(
        id: impl Into<String>,
        statuses: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            attempts: Some(statuses.into_iter().map(Attempt::new).collect()),
        }
    }

    pub fn id(&self) -> &str {
        or_blank(self.id.as_deref())
    }

    /// Product id derived from the delivery id, see [`crate::derive_product_id`].
    pub fn product_id(&self) -> &str {
        crate::derive_product_id(self.id())
    }

    pub fn attempts(&self) -> &[Attempt] {
        self.attempts.as_deref().unwrap_or_default()
    }
}

/// One recorded attempt to complete a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Attempt {
    #[serde(default, deserialize_with = "lenient_string")]
    pub attempt_status: Option<String>,
}

impl Attempt {
    pub fn new(attempt_status: impl Into<String>) -> Self {
        Self {
            attempt_status: Some(attempt_status.into()),
        }
    }

    pub fn attempt_status(&self) -> &str {
        self.attempt_status.as_deref().unwrap_or(BLANK)
    }
}

/// Deserialize a scalar as an optional string.
///
/// `null` becomes `None`; numbers and booleans are rendered with their JSON
/// text; strings pass through.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
