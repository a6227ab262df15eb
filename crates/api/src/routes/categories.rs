//! Route definitions for categories, mounted at `/categories`.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// GET    /tree              -> get_tree
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/tree", get(categories::get_tree))
}
