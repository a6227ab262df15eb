//! Category rows used to assemble the category tree.

use catalog_core::category_tree::CategoryRecord;
use catalog_core::types::DbId;
use sqlx::FromRow;

/// A category with the optional aggregates requested for the tree.
///
/// An aggregate column is `NULL` when it was not requested.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryTreeRow {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub path: String,
    pub attribute_count: Option<i64>,
    pub product_count: Option<i64>,
}

impl From<CategoryTreeRow> for CategoryRecord {
    fn from(row: CategoryTreeRow) -> Self {
        CategoryRecord {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            level: row.level,
            path: row.path,
            attribute_count: row.attribute_count,
            product_count: row.product_count,
        }
    }
}
