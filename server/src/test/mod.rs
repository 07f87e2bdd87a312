#![allow(clippy::unwrap_used)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use tripboard_core::{DestinationId, EventType, Point, PointId};

use crate::{router::setup_router, seed, state::Store};

mod points;

pub const TOKEN: &str = "dGVzdDp0ZXN0";

/// Server over the seeded catalog holding exactly `points`
pub fn setup_server(points: Vec<Point>) -> TestServer {
    let store = Store::new(points, seed::destinations(), seed::offers());
    TestServer::new(setup_router(store)).unwrap()
}

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

pub fn stored_point(id: &str) -> Point {
    Point {
        id: PointId::from(id),
        event_type: EventType::Flight,
        destination_id: DestinationId::from("1"),
        date_from: ts("2025-03-18T10:00:00Z"),
        date_to: ts("2025-03-18T12:00:00Z"),
        base_price: 300,
        offers: vec!["luggage".into()],
        is_favorite: false,
    }
}

#[tokio::test]
async fn health_ping_is_public() {
    let server = setup_server(vec![]);

    server.get("/health/ping").await.assert_status_ok();
}

#[tokio::test]
async fn docs_are_served() {
    let server = setup_server(vec![]);

    let response = server.get("/docs/api.json").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["info"]["title"], "Tripboard API");
    assert!(json["paths"].get("/points").is_some());
    assert!(json["paths"].get("/offers").is_some());
}

#[tokio::test]
async fn requests_without_authorization_are_rejected() {
    let server = setup_server(vec![stored_point("a")]);

    for path in ["/points", "/destinations", "/offers"] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Authorization header is missing"
        );
    }

    server.delete("/points/a").await.assert_status_unauthorized();
}
