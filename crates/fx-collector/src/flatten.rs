//! Flattening of delivery payloads into output rows.
//!
//! This is the synchronous part of the Delivery Fetcher: given the context of
//! one waypoint and its deliveries, produce the rows.

use fx_types::{Delivery, DeliveryRow, RowContext, BLANK};

/// Flatten the deliveries of one waypoint.
///
/// - No deliveries: one row with blank `attempt_status` and `product_id`.
/// - A delivery without attempts: one row with blank `attempt_status`.
/// - Otherwise one row per attempt, all sharing the delivery's `product_id`.
///
/// Never returns an empty vector.
pub fn flatten_deliveries(ctx: &RowContext, deliveries: &[Delivery]) -> Vec<DeliveryRow> {
    if deliveries.is_empty() {
        return vec![ctx.blank_row()];
    }

    let mut rows = Vec::with_capacity(deliveries.len());
    for delivery in deliveries {
        let product_id = delivery.product_id();
        let attempts = delivery.attempts();

        if attempts.is_empty() {
            rows.push(ctx.row(BLANK, product_id));
        } else {
            rows.extend(
                attempts
                    .iter()
                    .map(|attempt| ctx.row(attempt.attempt_status(), product_id)),
            );
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_types::Attempt;

    fn ctx() -> RowContext {
        RowContext::new("BO016", "RUTA 1", "CUST-1")
    }

    #[test]
    fn test_no_deliveries_gives_one_blank_row() {
        let rows = flatten_deliveries(&ctx(), &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values(), ["BO016", "RUTA 1", "CUST-1", BLANK, BLANK]);
    }

    #[test]
    fn test_two_attempts_share_product_id() {
        let deliveries = vec![Delivery::new("DEL_PROD123", ["DELIVERED", "FAILED"])];
        let rows = flatten_deliveries(&ctx(), &deliveries);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "PROD123");
        assert_eq!(rows[1].product_id, "PROD123");
        assert_eq!(rows[0].attempt_status, "DELIVERED");
        assert_eq!(rows[1].attempt_status, "FAILED");
        assert_eq!(rows[0].customer_id, rows[1].customer_id);
    }

    #[test]
    fn test_delivery_without_attempts() {
        let deliveries = vec![
            Delivery::new("DEL123", Vec::<String>::new()),
            Delivery {
                id: Some("DEL_X".into()),
                attempts: None,
            },
        ];
        let rows = flatten_deliveries(&ctx(), &deliveries);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "DEL123");
        assert_eq!(rows[0].attempt_status, BLANK);
        assert_eq!(rows[1].product_id, "X");
        assert_eq!(rows[1].attempt_status, BLANK);
    }

    #[test]
    fn test_attempt_without_status() {
        let deliveries = vec![Delivery {
            id: None,
            attempts: Some(vec![Attempt::default()]),
        }];
        let rows = flatten_deliveries(&ctx(), &deliveries);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attempt_status, BLANK);
        assert_eq!(rows[0].product_id, BLANK);
    }

    #[test]
    fn test_rows_follow_delivery_order() {
        let deliveries = vec![
            Delivery::new("A_1", ["DELIVERED"]),
            Delivery::new("B_2", ["FAILED", "DELIVERED"]),
        ];
        let rows = flatten_deliveries(&ctx(), &deliveries);

        let products: Vec<&str> = rows.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(products, ["1", "2", "2"]);
    }
}
