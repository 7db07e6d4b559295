//! Output row types.
//!
//! [`DeliveryRow`] is the terminal leaf of the route → waypoint → delivery →
//! attempt flattening. It has no identity beyond its field values and is
//! never mutated after creation.

use serde::{Deserialize, Serialize};

/// Placeholder written for any missing or null value.
pub const BLANK: &str = "BLANK";

/// Output column names, in file order.
///
/// Must match the field order of [`DeliveryRow`], which is what the CSV
/// writer serializes.
pub const COLUMNS: [&str; 5] = [
    "dc_id",
    "ruta_name",
    "customer_id",
    "attempt_status",
    "product_id",
];

/// A single flattened delivery attempt.
///
/// All five fields are always populated, possibly with [`BLANK`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryRow {
    /// Distribution center the row was collected from.
    pub dc_id: String,

    /// Display name of the route.
    pub ruta_name: String,

    /// Customer served at the waypoint.
    pub customer_id: String,

    /// Status of the attempt (e.g., "DELIVERED", "FAILED").
    pub attempt_status: String,

    /// Product identifier derived from the delivery id.
    pub product_id: String,
}

impl DeliveryRow {
    /// Returns the field values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 5] {
        [
            &self.dc_id,
            &self.ruta_name,
            &self.customer_id,
            &self.attempt_status,
            &self.product_id,
        ]
    }
}

/// Values known before the delivery level is fetched.
///
/// Every row derived from one waypoint shares the same context, so the
/// context is built once and stamped onto each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContext {
    pub dc_id: String,
    pub ruta_name: String,
    pub customer_id: String,
}

impl RowContext {
    pub fn new(
        dc_id: impl Into<String>,
        ruta_name: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            dc_id: dc_id.into(),
            ruta_name: ruta_name.into(),
            customer_id: customer_id.into(),
        }
    }

    /// Context for a route whose waypoints are not known.
    pub fn for_route(dc_id: impl Into<String>, ruta_name: impl Into<String>) -> Self {
        Self::new(dc_id, ruta_name, BLANK)
    }

    /// Build a row carrying this context.
    pub fn row(
        &self,
        attempt_status: impl Into<String>,
        product_id: impl Into<String>,
    ) -> DeliveryRow {
        DeliveryRow {
            dc_id: self.dc_id.clone(),
            ruta_name: self.ruta_name.clone(),
            customer_id: self.customer_id.clone(),
            attempt_status: attempt_status.into(),
            product_id: product_id.into(),
        }
    }

    /// Row with `attempt_status` and `product_id` set to [`BLANK`].
    pub fn blank_row(&self) -> DeliveryRow {
        self.row(BLANK, BLANK)
    }
}

/// Substitute [`BLANK`] for an absent value.
#[inline]
pub fn or_blank(value: Option<&str>) -> &str {
    value.unwrap_or(BLANK)
}

/// Derive a product id from a delivery id.
///
/// The id is split on `_` and the second segment is taken, so
/// `"DEL_PROD123"` gives `"PROD123"` and `"A_B_C"` gives `"B"`.
/// An id without `_` is returned whole.
pub fn derive_product_id(delivery_id: &str) -> &str {
    delivery_id.split('_').nth(1).unwrap_or(delivery_id)
}
