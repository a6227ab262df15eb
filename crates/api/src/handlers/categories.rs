//! Handlers for the category hierarchy.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::category_tree::{build_tree, CategoryRecord};
use catalog_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::query::{tree_options, QueryPairs};
use crate::response::TreeResponse;
use crate::state::AppState;

/// GET /api/categories/tree
///
/// The full category forest, optionally with per-node attribute and product
/// counts.
pub async fn get_tree(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<impl IntoResponse> {
    let options = tree_options(&pairs);
    let rows = CategoryRepo::list_for_tree(
        &state.pool,
        options.include_attribute_count,
        options.include_product_count,
    )
    .await?;

    let tree = build_tree(rows.into_iter().map(CategoryRecord::from).collect());
    if tree.detached > 0 {
        tracing::warn!(
            detached = tree.detached,
            total = tree.total,
            "Categories without a reachable root were left out of the tree",
        );
    }

    Ok(Json(TreeResponse {
        data: tree.roots,
        total: tree.total,
    }))
}
