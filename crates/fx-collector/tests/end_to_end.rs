//! Full DC → route → waypoint → delivery walk over HTTP.
//!
//! Run with: cargo test -p fx-collector --test end_to_end

use chrono::NaiveDate;
use fx_collector::{Collector, CollectorConfig, DeliveryRow, FoxtrotSource, BLANK};
use fx_ingestion::{ApiConfig, RetryPolicy};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn collector(server: &MockServer, dc_ids: &[&str]) -> Collector<FoxtrotSource> {
    let api = ApiConfig::new("token")
        .with_base_url(&server.base_url())
        .unwrap()
        .with_retry(RetryPolicy::new(2, Duration::from_millis(5)));
    let config = CollectorConfig::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        .with_dc_ids(dc_ids.iter().copied());

    Collector::new(FoxtrotSource::new(&api).unwrap(), config).unwrap()
}

fn sorted(mut rows: Vec<DeliveryRow>) -> Vec<DeliveryRow> {
    rows.sort_by(|a, b| a.values().cmp(&b.values()));
    rows
}

#[tokio::test]
async fn test_full_walk_flattens_every_level() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/find_by_date/2026-10-19")
                .header("authorization", "Bearer token");
            then.status(200).json_body(json!({
                "data": { "routes": [
                    { "id": 101, "name": "RUTA NORTE" },
                    { "id": 102, "name": "RUTA SUR" }
                ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dcs/BO016/routes/101/waypoints");
            then.status(200).json_body(json!({
                "data": { "waypoints": [
                    { "waypoint_id": "W1", "customer_id": "C-1" },
                    { "waypoint_id": "W2", "customer_id": "C-2" }
                ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dcs/BO016/routes/102/waypoints");
            then.status(200).json_body(json!({ "data": { "waypoints": [] } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/101/waypoints/W1/deliveries");
            then.status(200).json_body(json!({
                "data": { "deliveries": [
                    { "id": "DEL_PROD123", "attempts": [
                        { "attempt_status": "DELIVERED" },
                        { "attempt_status": "FAILED" }
                    ] },
                    { "id": "DEL123", "attempts": [] }
                ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/101/waypoints/W2/deliveries");
            then.status(200).json_body(json!({ "data": { "deliveries": [] } }));
        })
        .await;

    let collection = collector(&server, &["BO016"]).collect().await;

    let row = |ruta: &str, customer: &str, status: &str, product: &str| DeliveryRow {
        dc_id: "BO016".into(),
        ruta_name: ruta.into(),
        customer_id: customer.into(),
        attempt_status: status.into(),
        product_id: product.into(),
    };
    let expected = sorted(vec![
        row("RUTA NORTE", "C-1", "DELIVERED", "PROD123"),
        row("RUTA NORTE", "C-1", "FAILED", "PROD123"),
        row("RUTA NORTE", "C-1", BLANK, "DEL123"),
        row("RUTA NORTE", "C-2", BLANK, BLANK),
        row("RUTA SUR", BLANK, BLANK, BLANK),
    ]);

    assert_eq!(sorted(collection.rows), expected);
}

#[tokio::test]
async fn test_failing_dc_does_not_affect_siblings() {
    let server = MockServer::start_async().await;

    let failing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO77/routes/find_by_date/2026-10-19");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/find_by_date/2026-10-19");
            then.status(200).json_body(json!({
                "data": { "routes": [ { "id": "R1", "name": "RUTA 1" } ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dcs/BO016/routes/R1/waypoints");
            then.status(200).json_body(json!({ "data": { "waypoints": null } }));
        })
        .await;

    let collection = collector(&server, &["BO016", "BO77"]).collect().await;

    failing.assert_hits_async(3).await;
    assert_eq!(collection.rows.len(), 1);
    assert_eq!(collection.rows[0].dc_id, "BO016");
    assert_eq!(collection.rows[0].ruta_name, "RUTA 1");

    let bo77 = collection
        .dcs
        .iter()
        .find(|dc| dc.dc_id == "BO77")
        .expect("BO77 summary");
    assert_eq!(bo77.rows, 0);
}

#[tokio::test]
async fn test_failed_waypoint_deliveries_are_dropped() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/find_by_date/2026-10-19");
            then.status(200).json_body(json!({
                "data": { "routes": [ { "id": "R1", "name": "RUTA 1" } ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dcs/BO016/routes/R1/waypoints");
            then.status(200).json_body(json!({
                "data": { "waypoints": [
                    { "waypoint_id": "W1", "customer_id": "C-1" },
                    { "waypoint_id": "W2", "customer_id": "C-2" }
                ] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/R1/waypoints/W1/deliveries");
            then.status(401);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dcs/BO016/routes/R1/waypoints/W2/deliveries");
            then.status(200).json_body(json!({
                "data": { "deliveries": [
                    { "id": "X_P9", "attempts": [ { "attempt_status": "DELIVERED" } ] }
                ] }
            }));
        })
        .await;

    let collection = collector(&server, &["BO016"]).collect().await;

    assert_eq!(collection.rows.len(), 1);
    assert_eq!(collection.rows[0].customer_id, "C-2");
    assert_eq!(collection.rows[0].product_id, "P9");
}
