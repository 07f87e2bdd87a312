use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::{
    model::point::PointDto,
    test::{setup_server, stored_point, TOKEN},
};

fn payload() -> Value {
    json!({
        "base_price": 120,
        "date_from": "2025-04-01T08:00:00.000Z",
        "date_to": "2025-04-01T09:15:00.000Z",
        "destination": "3",
        "is_favorite": false,
        "offers": ["meal"],
        "type": "Train"
    })
}

#[tokio::test]
async fn points_get_all_ok() {
    let server = setup_server(vec![stored_point("a"), stored_point("b")]);

    let response = server.get("/points").authorization_bearer(TOKEN).await;
    response.assert_status_ok();

    let points = response.json::<Vec<PointDto>>();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id.as_deref(), Some("a"));
    assert_eq!(points[0].event_type, "flight");
    assert_eq!(points[0].date_from, "2025-03-18T10:00:00Z");
    assert_eq!(points[0].offers, vec!["luggage"]);
}

#[tokio::test]
async fn point_create_assigns_ulid() {
    let server = setup_server(vec![]);

    let response = server
        .post("/points")
        .authorization_bearer(TOKEN)
        .json(&payload())
        .await;
    response.assert_status(StatusCode::CREATED);

    let created = response.json::<PointDto>();
    let id = created.id.clone().unwrap();
    assert!(id.parse::<ulid::Ulid>().is_ok());
    assert_eq!(created.event_type, "train");
    assert_eq!(created.destination, "3");

    let listed = server
        .get("/points")
        .authorization_bearer(TOKEN)
        .await
        .json::<Vec<PointDto>>();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn point_create_bad_request() {
    let server = setup_server(vec![]);

    let mut unknown_destination = payload();
    unknown_destination["destination"] = json!("99");

    let mut foreign_offer = payload();
    foreign_offer["offers"] = json!(["gps"]);

    let mut inverted = payload();
    inverted["date_to"] = json!("2025-04-01T07:00:00.000Z");

    let mut unknown_type = payload();
    unknown_type["type"] = json!("rocket");

    for body in [unknown_destination, foreign_offer, inverted, unknown_type] {
        let response = server
            .post("/points")
            .authorization_bearer(TOKEN)
            .json(&body)
            .await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    let listed = server
        .get("/points")
        .authorization_bearer(TOKEN)
        .await
        .json::<Vec<PointDto>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn point_update_ok() {
    let server = setup_server(vec![stored_point("a")]);

    let mut body = payload();
    body["id"] = json!("ignored");
    body["is_favorite"] = json!(true);

    let response = server
        .put("/points/a")
        .authorization_bearer(TOKEN)
        .json(&body)
        .await;
    response.assert_status_ok();

    let updated = response.json::<PointDto>();
    assert_eq!(updated.id.as_deref(), Some("a"));
    assert!(updated.is_favorite);
    assert_eq!(updated.base_price, 120);
}

#[tokio::test]
async fn point_update_not_found() {
    let server = setup_server(vec![stored_point("a")]);

    server
        .put("/points/missing")
        .authorization_bearer(TOKEN)
        .json(&payload())
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn point_delete_ok() {
    let server = setup_server(vec![stored_point("a"), stored_point("b")]);

    server
        .delete("/points/a")
        .authorization_bearer(TOKEN)
        .await
        .assert_status_ok();

    let listed = server
        .get("/points")
        .authorization_bearer(TOKEN)
        .await
        .json::<Vec<PointDto>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.as_deref(), Some("b"));

    server
        .delete("/points/a")
        .authorization_bearer(TOKEN)
        .await
        .assert_status_not_found();
}
