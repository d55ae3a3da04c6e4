use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use quotes_core::{InMemoryQuoteRepository, QuoteHandler};
use quotes_server::router;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(QuoteHandler::new(Arc::new(InMemoryQuoteRepository::new())))
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn get_root_lists_seed_quote() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["quotes"][0]["author"], "Gandhi");
}

#[tokio::test]
async fn post_then_get_by_id_over_http() {
    let app = app();

    let (status, body) = send(
        app.clone(),
        "POST",
        "/",
        r#"{"author":"bill","message":"excellent!"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"message":"succesfully created quote"}"#);

    let (status, body) = send(app, "GET", "/2", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":2,"author":"bill","message":"excellent!"}"#);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (status, body) = send(app(), "GET", "/one", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"the id must be a positive integer"}"#);
}

#[tokio::test]
async fn patch_is_method_not_allowed() {
    let (status, body) = send(app(), "PATCH", "/", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, r#"{"error":"allowed methods [POST, GET]"}"#);
}
