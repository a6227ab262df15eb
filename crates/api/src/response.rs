//! Shared response envelope types for API handlers.
//!
//! Single payloads use a `{ "data": ... }` envelope; listings add a
//! `pagination` block and the category tree adds its `total`.

use catalog_core::pagination::Pagination;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": {...} }` envelope for paged listings.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// `{ "data": [...], "total": n }` envelope for the category tree.
#[derive(Debug, Serialize)]
pub struct TreeResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Number of categories fetched, including any that could not be
    /// placed in the tree.
    pub total: usize,
}
