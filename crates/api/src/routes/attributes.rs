//! Route definitions for attributes, mounted at `/attributes`.

use axum::routing::get;
use axum::Router;

use crate::handlers::attributes;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_attributes
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(attributes::list_attributes))
}
