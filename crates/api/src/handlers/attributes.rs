//! Handlers for attribute resolution.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::pagination::Pagination;
use catalog_db::models::attribute::AttributeWithDetails;
use catalog_db::repositories::AttributeRepo;

use crate::error::AppResult;
use crate::query::{attribute_filter, QueryPairs};
use crate::response::PaginatedResponse;
use crate::state::AppState;

/// GET /api/attributes
///
/// Attributes applicable (or, with `notApplicable`, not applicable) to the
/// selected category nodes, each annotated with its resolved link type.
pub async fn list_attributes(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<impl IntoResponse> {
    let filter = attribute_filter(&pairs);
    let page = AttributeRepo::list(&state.pool, &filter).await?;

    let data = page
        .rows
        .into_iter()
        .map(AttributeWithDetails::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(PaginatedResponse {
        data,
        pagination: Pagination::new(filter.page, page.total),
    }))
}
