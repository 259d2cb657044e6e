mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::json;

#[tokio::test]
async fn receive_acknowledges_first_record() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let event = json!({
        "Records": [
            {
                "EventSource": "aws:sns",
                "Sns": {
                    "Type": "Notification",
                    "Message": "hello"
                }
            }
        ]
    });

    let response = client
        .post(format!("{}/receive", app.address))
        .json(&event)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.expect("Failed to read body");
    assert_eq!(body, r#"{"response":"message received"}"#);
}

#[tokio::test]
async fn receive_ignores_records_after_the_first() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let event = json!({
        "Records": [
            { "Sns": { "Message": "first" } },
            { "Sns": { "Message": "second" } }
        ]
    });

    let response = client
        .post(format!("{}/receive", app.address))
        .json(&event)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn event_without_records_is_rejected_as_malformed() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    // The original callback indexed Records[0] unconditionally and
    // threw; an empty event must map to a defined error instead.
    let response = client
        .post(format!("{}/receive", app.address))
        .json(&json!({ "Records": [] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "malformed event: no records");
}

#[tokio::test]
async fn event_missing_records_field_is_rejected_as_malformed() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/receive", app.address))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn non_json_body_is_a_client_error() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/receive", app.address))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_client_error());
}
