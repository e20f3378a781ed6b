//! HTTP surface tests
//!
//! Requests go through the full router (extractors, error mapping, JSON
//! shapes) with the in-memory store behind it.

mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::*;
use flora_server::api::create_router;
use flora_server::auth::OPERATOR_HEADER;
use flora_server::db::ShopStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> (Router, Arc<flora_server::db::MemoryShopStore>) {
    let store = seeded_store().await;
    let router = create_router(app_state(store.clone(), Arc::new(RecordingChannel::default())));
    (router, store)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    operator: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = operator {
        builder = builder.header(OPERATOR_HEADER, id);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn checkout(cart: Value) -> Value {
    json!({
        "name": "Anna",
        "phone": "+1 555 0100",
        "details": "Main st. 1",
        "cart": cart,
    })
}

#[tokio::test]
async fn test_checkout_success_shape() {
    let (app, store) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(checkout(json!([{ "id": 5, "qty": 2 }]))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 200.0);
    let order_id = body["orderId"].as_i64().unwrap();
    assert!(store.get_order(order_id).await.is_ok());
    assert_eq!(store.get_product(5).await.unwrap().stock, 8);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let (app, store) = app().await;

    let (status, body) = send(&app, Method::POST, "/api/orders", None, Some(checkout(json!([])))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 4007);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn test_checkout_out_of_stock_names_product() {
    let (app, _store) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(checkout(json!([{ "id": 7, "qty": 2 }]))),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 6003);
    assert!(body["error"].as_str().unwrap().contains("Orchid"));
    assert_eq!(body["details"]["available"], 1);
}

#[tokio::test]
async fn test_checkout_unknown_product() {
    let (app, _store) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(checkout(json!([{ "id": 999, "qty": 1 }]))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_checkout_malformed_quantity() {
    let (app, store) = app().await;

    for qty in [json!(1.5), json!("two")] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/orders",
            None,
            Some(checkout(json!([{ "id": 5, "qty": qty }]))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(checkout(json!([{ "id": 5, "qty": 0 }]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn test_catalog_reads() {
    let (app, _store) = app().await;

    let (status, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::GET, "/api/products/6", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Tulips");
    assert_money(&body["data"]["price"], 19.99);

    let (status, _) = send(&app, Method::GET, "/api/products/404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/categories", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Roses");
}

#[tokio::test]
async fn test_health() {
    let (app, _store) = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");
}

#[tokio::test]
async fn test_admin_requires_operator() {
    let (app, _store) = app().await;

    let (status, body) = send(&app, Method::GET, "/api/admin/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = send(&app, Method::GET, "/api/admin/orders", Some("999"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, _) = send(&app, Method::GET, "/api/admin/orders", Some("111"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_operator_order_lifecycle() {
    let (app, _store) = app().await;

    let (_, placed) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(checkout(json!([{ "id": 6, "qty": 2 }, { "id": 5, "qty": 1 }]))),
    )
    .await;
    let order_id = placed["orderId"].as_i64().unwrap();

    let (_, list) = send(&app, Method::GET, "/api/admin/orders", Some("111"), None).await;
    assert_eq!(list["data"][0]["id"], order_id);
    assert_eq!(list["data"][0]["status"], "new");

    let uri = format!("/api/admin/orders/{order_id}");
    let (status, detail) = send(&app, Method::GET, &uri, Some("222"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["customer_name"], "Anna");
    assert_money(&detail["data"]["total_price"], 139.98);
    assert_eq!(detail["data"]["items"].as_array().unwrap().len(), 2);

    let uri = format!("/api/admin/orders/{order_id}/complete");
    let (status, completed) = send(&app, Method::POST, &uri, Some("111"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["data"]["status"], "completed");

    let (status, body) = send(&app, Method::POST, &uri, Some("111"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4003);

    let (_, archive) = send(&app, Method::GET, "/api/admin/orders/archive", Some("111"), None).await;
    assert_eq!(archive["data"][0]["id"], order_id);

    let (_, stats) = send(&app, Method::GET, "/api/admin/stats", Some("333"), None).await;
    assert_eq!(stats["data"]["all_time"]["completed_orders"], 1);
    assert_money(&stats["data"]["all_time"]["revenue"], 139.98);
    assert_eq!(stats["data"]["today"]["completed_orders"], 1);
    assert_eq!(stats["data"]["active_orders"], 0);
    assert_eq!(stats["data"]["units_in_stock"], 9 + 48 + 1);
}

#[tokio::test]
async fn test_stats_day_parses_date() {
    let (app, _store) = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/stats/day?date=01.03.2024",
        Some("111"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2024-03-01");
    assert_eq!(body["data"]["completed_orders"], 0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/stats/day?date=2024-03-01",
        Some("111"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_category_delete_blocked_by_products() {
    let (app, _store) = app().await;

    let (status, body) = send(&app, Method::DELETE, "/api/admin/categories/1", Some("111"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);

    let (status, _) = send(&app, Method::DELETE, "/api/admin/products/5", Some("111"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, "/api/admin/categories/1", Some("111"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_product_admin_validation() {
    let (app, _store) = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/products",
        Some("111"),
        Some(json!({ "title": "Peonies", "price": 45.5, "stock": 12, "category_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["data"]["id"].as_i64().unwrap();
    assert!(id > 7);

    let uri = format!("/api/admin/products/{id}");
    let (status, updated) = send(&app, Method::PUT, &uri, Some("111"), Some(json!({ "stock": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["stock"], 3);
    assert_eq!(updated["data"]["price"], 45.5);

    let (status, body) = send(&app, Method::PUT, &uri, Some("111"), Some(json!({ "price": -1.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, body) = send(&app, Method::PUT, &uri, Some("111"), Some(json!({ "stock": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6004);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some("111"),
        Some(json!({ "price": 10_000_000_000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn test_malformed_admin_bodies_use_error_shape() {
    let (app, _store) = app().await;

    let cases = [
        (Method::POST, "/api/admin/categories", json!({ "name": "Roses" })),
        (Method::POST, "/api/admin/products", json!({ "title": "Peonies", "price": "cheap" })),
        (Method::PUT, "/api/admin/products/5", json!({ "stock": "many" })),
    ];
    for (method, uri, payload) in cases {
        let (status, body) = send(&app, method, uri, Some("111"), Some(payload)).await;
        assert!(status.is_client_error(), "{uri}: {status}");
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 5);
    }
}

#[tokio::test]
async fn test_product_can_leave_its_category() {
    let (app, _store) = app().await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/admin/products/5",
        Some("111"),
        Some(json!({ "category_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["category_id"], Value::Null);
    assert_eq!(updated["data"]["title"], "Red Roses");

    let (status, _) = send(&app, Method::DELETE, "/api/admin/categories/1", Some("111"), None).await;
    assert_eq!(status, StatusCode::OK);
}
