//! Shared helpers for the HTTP API tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pizzeria::http_server::app;
use pizzeria::storage::{Database, DbConfig};

/// Router over a fresh in-memory database, plus the database handle
pub async fn test_app() -> (Router, Database) {
    let db = Database::open(&DbConfig::in_memory()).await.unwrap();
    (app(db.clone()), db)
}

/// Send a request with an optional JSON body; returns status and parsed body.
///
/// Non-JSON bodies come back as a JSON string.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let raw = body.map(|b| b.to_string()).unwrap_or_default();
    send_raw(app, method, uri, raw).await
}

/// Send a request with a raw body
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// Create a topping and return its id
pub async fn create_topping(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/toppings",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

/// Create a pizza and return its id
pub async fn create_pizza(app: &Router, name: &str, topping_ids: &[i64]) -> i64 {
    let toppings: Vec<Value> = topping_ids
        .iter()
        .map(|id| serde_json::json!({ "topping_id": id }))
        .collect();
    let (status, body) = send(
        app,
        Method::POST,
        "/pizzas",
        Some(serde_json::json!({ "name": name, "toppings": toppings })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

/// Find a pizza in the `GET /pizzas` listing
pub async fn find_pizza(app: &Router, id: i64) -> Option<Value> {
    let (_, body) = send(app, Method::GET, "/pizzas", None).await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
        .cloned()
}

/// Sorted topping ids of a listed pizza
pub fn topping_ids(pizza: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = pizza["toppings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    ids
}
