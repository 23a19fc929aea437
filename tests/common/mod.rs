//! Shared helpers for integration tests.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Send a request through the router without binding a port.
pub async fn send(router: &Router, method: Method, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

pub async fn get(router: &Router, path: &str) -> (StatusCode, String) {
    send(router, Method::GET, path).await
}

/// GET `path` and parse the body as JSON, asserting a 200.
#[allow(dead_code)]
pub async fn get_json(router: &Router, path: &str) -> Value {
    let (status, body) = get(router, path).await;
    assert_eq!(status, StatusCode::OK, "GET {path} returned {status}: {body}");
    serde_json::from_str(&body).unwrap()
}
