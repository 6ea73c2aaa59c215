//! End-to-end tests of the REST surface.

use item_sdk::ItemClient;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn crud_lifecycle() {
    let server = common::start_server().await;
    let client = ItemClient::new(&server.url());

    assert!(client.get("42").await.unwrap().is_none());

    let created = client.create(&json!({"name": "x"})).await.unwrap();
    assert_eq!(Value::Object(created.clone()), json!({"id": "1", "name": "x"}));

    let fetched = client.get("1").await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update("1", &json!({"name": "y", "qty": 2}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Value::Object(updated), json!({"id": "1", "name": "y", "qty": 2}));

    assert_eq!(client.list().await.unwrap().len(), 1);
    assert!(client.delete("1").await.unwrap());
    assert!(!client.delete("1").await.unwrap());
    assert!(client.list().await.unwrap().is_empty());
    assert!(client.update("1", &json!({})).await.unwrap().is_none());

    server.shutdown.trigger();
}

#[tokio::test]
async fn status_codes_and_headers() {
    let server = common::start_server().await;
    let http = reqwest::Client::new();
    let url = server.url();

    let res = http.post(format!("{url}/api/items")).body("[1,2,3]").send().await.unwrap();
    assert_eq!(res.status(), 400);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Error processing request"));
    assert!(server.store.is_empty());

    let res = http.patch(format!("{url}/api/items/1")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Method not allowed"}));

    let res = http.delete(format!("{url}/elsewhere")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "The resource '/elsewhere' was not found."}));

    let res = http.get(format!("{url}/api/items/1/extra")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}

#[tokio::test]
async fn info_route_for_any_method() {
    let server = common::start_server().await;
    let http = reqwest::Client::new();

    for path in ["/", "/api"] {
        let res = http.get(format!("{}{}", server.url(), path)).send().await.unwrap();
        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["name"], "Item Server REST API");
    }

    let res = http.post(format!("{}/api", server.url())).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
}

#[tokio::test]
async fn custom_route_keywords() {
    let mut config = item_server::ServiceConfig::default();
    config.api.root = "v1".into();
    config.api.collection = "widgets".into();
    let server = common::start_server_with(config).await;

    let client = ItemClient::with_path(&server.url(), "/v1/widgets");
    let created = client.create(&json!({"color": "blue"})).await.unwrap();
    assert_eq!(created["id"], "1");

    let res = reqwest::get(format!("{}/api/items", server.url())).await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}
