//! End-to-end API tests for the item service.

use std::sync::Arc;

use serde_json::{json, Value};

mod common;

use common::FailingStore;

#[tokio::test]
async fn root_reports_running() {
    let app = common::spawn_default_app().await;

    let res = common::client().get(app.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Backend API is running");
}

#[tokio::test]
async fn health_is_ok_even_when_store_is_down() {
    let app = common::spawn_app(Arc::new(FailingStore)).await;

    let res = common::client().get(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let app = common::spawn_default_app().await;
    let client = common::client();

    let res = client
        .post(app.url("/items"))
        .json(&json!({ "name": "widget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let created: Value = res.json().await.unwrap();
    assert_eq!(created["name"], "widget");
    assert!(!created["id"].as_str().unwrap_or_default().is_empty());
    assert!(!created["createdAt"].as_str().unwrap_or_default().is_empty());

    let res = client.get(app.url("/items")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let items: Vec<Value> = res.json().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], created["id"]);
}

#[tokio::test]
async fn newest_item_is_listed_first() {
    let app = common::spawn_default_app().await;
    let client = common::client();

    for name in ["first", "second", "third"] {
        let res = client
            .post(app.url("/items"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
    }

    let items: Vec<Value> = client
        .get(app.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = items.iter().filter_map(|i| i["name"].as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let app = common::spawn_default_app().await;
    let client = common::client();

    for name in ["a", "b", "c"] {
        client
            .post(app.url("/items"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
    }

    let first: Vec<Value> = client
        .get(app.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Vec<Value> = client
        .get(app.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_name_is_rejected_and_nothing_persists() {
    let app = common::spawn_default_app().await;
    let client = common::client();

    let res = client
        .post(app.url("/items"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert!(!body["message"].as_str().unwrap_or_default().is_empty());

    let items: Vec<Value> = client
        .get(app.url("/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = common::spawn_default_app().await;

    let res = common::client()
        .post(app.url("/items"))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn store_failure_maps_to_server_error() {
    let app = common::spawn_app(Arc::new(FailingStore)).await;
    let client = common::client();

    let res = client.get(app.url("/items")).send().await.unwrap();
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Server error");

    let res = client
        .post(app.url("/items"))
        .json(&json!({ "name": "widget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Server error");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = common::spawn_default_app().await;

    let res = common::client()
        .get(app.url("/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}
