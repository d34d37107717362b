//! Endpoint tests for the contact relay

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{RecordingMailer, TEST_TARGET, test_app, valid_body};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn post_contact(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app(RecordingMailer::working());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn health_is_ok_even_with_failing_transport() {
    let app = test_app(RecordingMailer::failing("smtp down"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn missing_required_field_returns_400() {
    let mailer = RecordingMailer::working();
    let app = test_app(mailer.clone());

    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("email");

    let response = app.oneshot(post_contact(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({"error": "Missing required fields"})
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn empty_required_field_counts_as_missing() {
    let mailer = RecordingMailer::working();
    let app = test_app(mailer.clone());

    let mut body = valid_body();
    body["outcome"] = json!("");

    let response = app.oneshot(post_contact(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({"error": "Missing required fields"})
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn unreadable_body_returns_400() {
    let app = test_app(RecordingMailer::working());

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({"error": "Missing required fields"})
    );
}

#[tokio::test]
async fn valid_submission_relays_to_target() {
    let mailer = RecordingMailer::working();
    let app = test_app(mailer.clone());

    let response = app.oneshot(post_contact(&valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({"message": "Message sent successfully"})
    );

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, TEST_TARGET);
    assert!(sent[0].subject.contains("Ada Lovelace"));
    assert!(sent[0].text_body.contains("Specialty: Leadership coaching"));
    assert!(sent[0].html_body.contains("A site that books calls.<br>Less admin."));
}

#[tokio::test]
async fn optional_website_may_be_omitted() {
    let mailer = RecordingMailer::working();
    let app = test_app(mailer.clone());

    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("currentWebsite");

    let response = app.oneshot(post_contact(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(mailer.sent()[0].text_body.contains("Website: N/A"));
}

#[tokio::test]
async fn transport_failure_returns_500_with_details() {
    let mailer = RecordingMailer::failing("mail quota exceeded");
    let app = test_app(mailer);

    let response = app.oneshot(post_contact(&valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Failed to send message");
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("mail quota exceeded")
    );
}
