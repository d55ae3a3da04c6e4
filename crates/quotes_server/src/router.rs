//! Axum wiring for the quote handler.
//!
//! # Responsibility
//! - Route every request to the core handler through a single fallback.
//! - Run the blocking handler off the async workers.
//! - Emit one `http_request` event per request.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use log::{error, info};
use quotes_core::{QuoteHandler, QuoteResponse};
use std::time::Instant;

/// Builds the service router; the handler owns all path dispatch.
pub fn router(handler: QuoteHandler) -> Router {
    Router::new().fallback(serve_quotes).with_state(handler)
}

async fn serve_quotes(
    State(handler): State<QuoteHandler>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let started_at = Instant::now();
    let path = uri.path().to_string();

    let request_method = method.clone();
    let request_path = path.clone();
    let outcome =
        tokio::task::spawn_blocking(move || handler.handle(&request_method, &request_path, &body))
            .await;

    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            error!(
                "event=http_request module=server status=error method={method} path={path} error={err}"
            );
            QuoteResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: Vec::new(),
            }
        }
    };

    info!(
        "event=http_request module=server status={} method={method} path={path} duration_ms={}",
        response.status.as_u16(),
        started_at.elapsed().as_millis()
    );

    into_response(response)
}

fn into_response(response: QuoteResponse) -> Response {
    match response.content_type() {
        Some(content_type) => (
            response.status,
            [(header::CONTENT_TYPE, content_type)],
            response.body,
        )
            .into_response(),
        None => (response.status, response.body).into_response(),
    }
}
