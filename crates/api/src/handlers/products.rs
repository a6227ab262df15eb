//! Handlers for the product listing.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::pagination::Pagination;
use catalog_db::repositories::ProductRepo;

use crate::error::AppResult;
use crate::query::{product_filter, QueryPairs};
use crate::response::PaginatedResponse;
use crate::state::AppState;

/// GET /api/products
///
/// Products in the given categories or their descendants; all products when
/// no category is given.
pub async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<impl IntoResponse> {
    let filter = product_filter(&pairs);
    let page = ProductRepo::list(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse {
        data: page.rows,
        pagination: Pagination::new(filter.page, page.total),
    }))
}
