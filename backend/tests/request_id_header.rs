use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension,
};
use tower::ServiceExt;
use uuid::Uuid;
use timeclock_backend::middleware::request_id::{request_id, RequestId};

mod support;

fn echo_router() -> axum::Router {
    axum::Router::new()
        .route(
            "/test",
            axum::routing::get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(axum::middleware::from_fn(request_id))
}

#[tokio::test]
async fn test_request_id_header_added_to_response() {
    let response = echo_router()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(support::body_text(response).await, id);
}

#[tokio::test]
async fn test_request_id_header_persists_client_id() {
    let client_id = "client-req-123";
    let response = echo_router()
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("x-request-id", client_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), client_id);
}

#[tokio::test]
async fn test_request_id_header_persists_correlation_id() {
    let correlation_id = "corr-req-456";
    let response = echo_router()
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("x-correlation-id", correlation_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        correlation_id
    );
}

#[tokio::test]
async fn full_router_echoes_request_id_on_errors() {
    let app = support::test_router(support::memory_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/employee/9999")
                .header("x-request-id", "lookup-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "lookup-1");
    let body = support::body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}
