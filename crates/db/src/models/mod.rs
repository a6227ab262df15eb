//! Row types and API-facing models.
//!
//! Row structs derive `FromRow` and mirror a SELECT list exactly; API models
//! derive `Serialize` with camelCase field names.

pub mod attribute;
pub mod category;
pub mod product;

/// One page of rows together with the number of rows matching before
/// pagination.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: i64,
}
