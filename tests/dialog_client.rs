mod common;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use voice_assistant_adapters::config::DialogConfig;
use voice_assistant_adapters::dialog::{DialogApi, DialogError, Reply, WebhookDialogClient};

fn client_for(url: String) -> WebhookDialogClient {
    let config = DialogConfig {
        webhook_url: url,
        api_key: "api-key".to_string(),
        unit_key: "unit-key".to_string(),
    };
    WebhookDialogClient::new(&config, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_send_posts_json_and_decodes_replies() {
    let captured: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let app = Router::new().route(
        "/webhook",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some((headers, body));
                Json(json!({
                    "query": "hi",
                    "text": "Hello there",
                    "action": "greet",
                    "intent": "/Hello",
                    "question": false,
                    "replies": [
                        { "type": "text", "text": "Hello there" },
                        { "type": "buttons", "buttons": [ { "text": "Help" } ] }
                    ],
                    "data": { "turn": 1 }
                }))
            }
        }),
    );
    let addr = common::spawn_server(app).await;
    let client = client_for(format!("http://{}/webhook", addr));

    let request = client.create_request("hi");
    assert_eq!(request.api_key, "api-key");
    assert_eq!(request.unit_key, "unit-key");
    assert!(request.data.is_empty());

    let response = client.send(request).await.unwrap();
    assert_eq!(response.intent.as_deref(), Some("/Hello"));
    assert_eq!(response.question, Some(false));
    assert_eq!(response.replies.len(), 2);
    assert!(matches!(&response.replies[0], Reply::Text(t) if t.text == "Hello there"));
    assert_eq!(response.data, Some(json!({ "turn": 1 })));

    let (headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        body,
        json!({ "query": "hi", "apiKey": "api-key", "unitKey": "unit-key", "data": {} })
    );
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let app = Router::new().route(
        "/webhook",
        post(|| async { (StatusCode::FORBIDDEN, "bad key") }),
    );
    let addr = common::spawn_server(app).await;
    let client = client_for(format!("http://{}/webhook", addr));

    let err = client.send(client.create_request("hi")).await.unwrap_err();
    match err {
        DialogError::Status(code) => assert_eq!(code.as_u16(), 403),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_body_is_reported() {
    let app = Router::new().route("/webhook", post(|| async { "" }));
    let addr = common::spawn_server(app).await;
    let client = client_for(format!("http://{}/webhook", addr));

    let err = client.send(client.create_request("hi")).await.unwrap_err();
    assert!(matches!(err, DialogError::EmptyBody));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let app = Router::new().route("/webhook", post(|| async { "<html>oops</html>" }));
    let addr = common::spawn_server(app).await;
    let client = client_for(format!("http://{}/webhook", addr));

    let err = client.send(client.create_request("hi")).await.unwrap_err();
    assert!(matches!(err, DialogError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_webhook_is_a_transport_error() {
    let addr = common::closed_addr().await;
    let client = client_for(format!("http://{}/webhook", addr));

    let err = client.send(client.create_request("hi")).await.unwrap_err();
    assert!(matches!(err, DialogError::Transport(_)));
}
