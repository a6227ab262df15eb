//! Router-level behaviour that does not need a reachable database.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::get as get_route;
use axum::{middleware, Router};
use common::{body_json, build_test_app, build_test_app_with, get, test_config, unreachable_pool};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use catalog_api::config::Environment;
use catalog_api::error::{finish_error_response, panic_response};
use catalog_api::state::AppState;

// ---------------------------------------------------------------------------
// Test: unknown routes return the JSON 404 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Route not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: database failures surface as a generic 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_failure_returns_generic_500() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/api/attributes?categoryNodes=4").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn development_errors_carry_a_message_per_router() {
    let mut development = test_config();
    development.environment = Environment::Development;
    let dev_app = build_test_app_with(unreachable_pool(), development);
    let test_app = build_test_app(unreachable_pool());

    let dev = body_json(get(dev_app, "/api/attributes?categoryNodes=4").await).await;
    let quiet = body_json(get(test_app, "/api/attributes?categoryNodes=4").await).await;

    assert_eq!(dev["code"], "INTERNAL_ERROR");
    assert!(dev["message"]
        .as_str()
        .is_some_and(|m| m.starts_with("Database error")));
    assert!(quiet.get("message").is_none());
}

#[tokio::test]
async fn every_listing_fails_cleanly_without_a_database() {
    for uri in ["/api/products", "/api/categories/tree?includeProductCount=true"] {
        let response = get(build_test_app(unreachable_pool()), uri).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "unexpected status for {uri}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: health reports a degraded database instead of failing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_database() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["dbHealthy"], false);
    assert!(json["version"].is_string());
    assert!(json["timestamp"].is_string());
    assert!(json["uptime"].is_number());
}

// ---------------------------------------------------------------------------
// Test: service index and documentation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_lists_endpoints() {
    let response = get(build_test_app(unreachable_pool()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["documentation"], "/api");
    assert_eq!(json["endpoints"]["attributes"], "/api/attributes");
}

#[tokio::test]
async fn api_docs_describe_query_parameters() {
    let response = get(build_test_app(unreachable_pool()), "/api").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let attributes = &json["endpoints"]["attributes"];
    assert_eq!(attributes["path"], "/api/attributes");
    assert!(attributes["queryParams"]["categoryNodes"].is_string());
    assert!(json["endpoints"]["categories"]["queryParams"]["includeProductCount"].is_string());
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(build_test_app(unreachable_pool()), "/").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(
        request_id.to_str().unwrap().len(),
        36,
        "x-request-id should be a UUID string"
    );
}

#[tokio::test]
async fn incoming_request_id_is_propagated() {
    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app(unreachable_pool())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"].to_str().unwrap(), "trace-me");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/attributes")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = build_test_app(unreachable_pool())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"].to_str().unwrap(),
        "http://localhost:5173"
    );
    let allow_methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(
        allow_methods.contains("GET"),
        "Allow-Methods should contain GET, got: {allow_methods}"
    );
}

// ---------------------------------------------------------------------------
// Test: timeouts use the JSON error body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_returns_json_408() {
    async fn stall() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    let state = AppState::new(unreachable_pool(), test_config());
    let app = Router::new()
        .route("/slow", get_route(stall))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(20),
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            finish_error_response,
        ))
        .with_state(state);
    let response = get(app, "/slow").await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request timed out");
    assert_eq!(json["code"], "REQUEST_TIMEOUT");
}

// ---------------------------------------------------------------------------
// Test: panics become the standard 500 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn handler_panic_returns_json_500() {
    async fn explode() -> &'static str {
        panic!("exploded")
    }

    let app = Router::new()
        .route("/boom", get_route(explode))
        .layer(CatchPanicLayer::custom(panic_response));
    let response = get(app, "/boom").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}
