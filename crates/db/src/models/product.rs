//! Product listing model.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A product with its owning category's name and path denormalized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub description: Option<String>,
    pub category_name: String,
    pub category_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
