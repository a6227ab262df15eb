pub mod attributes;
pub mod categories;
pub mod health;
pub mod products;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                    endpoint documentation
/// /health              service and database health
/// /attributes          attribute resolution listing
/// /categories/tree     category forest
/// /products            product listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::meta::docs))
        .merge(health::router())
        .nest("/attributes", attributes::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
}

/// Routes mounted at the server root.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::meta::index))
}
