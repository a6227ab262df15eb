//! Route definitions for products, mounted at `/products`.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_products
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(products::list_products))
}
