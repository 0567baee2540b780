//! Router-level tests that run without a MongoDB instance.
//!
//! The driver connects lazily, so building the router only needs a parsable
//! DSN; every route exercised here answers before touching the store.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use ensaluti::{ensaluti::app, store::UserStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn test_app() -> Router {
    let store = UserStore::connect("mongodb://localhost:27017/ensaluti_test")
        .await
        .expect("client options should parse");

    app(store)
}

async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

fn form_post(path: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request should build")
}

#[tokio::test]
async fn home_renders() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Sign up"));
    assert!(body.contains("sign in"));
}

#[tokio::test]
async fn signup_form_renders_without_error() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/signup").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("action=\"/signup\""));
    assert!(!body.contains("class=\"error\""));
}

#[tokio::test]
async fn signin_form_renders_without_error() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/signin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("action=\"/signin\""));
    assert!(!body.contains("class=\"error\""));
}

#[tokio::test]
async fn health_reports_package_metadata() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));

    let body = body_string(response).await;
    assert!(body.contains("\"name\":\"ensaluti\""));
}

// Every signin submission gets an answer; empty or absent fields are a 400,
// never a hung request.
#[tokio::test]
async fn signin_with_empty_fields_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/signin", "username=&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Invalid credentials"));
}

#[tokio::test]
async fn signin_with_missing_fields_is_rejected() {
    let app = test_app().await;

    let response = app.oneshot(form_post("/signin", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Invalid credentials"));
}

#[tokio::test]
async fn signin_with_missing_password_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/signin", "username=alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Invalid credentials"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
