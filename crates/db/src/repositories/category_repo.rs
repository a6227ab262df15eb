//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::CategoryTreeRow;

/// Column list for tree assembly (aggregates are appended per request).
const TREE_COLUMNS: &str = "c.id, c.name, c.parent_id, c.level, c.path";

/// Provides read access to the category hierarchy.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Fetch every category in one statement, optionally with the number of
    /// distinct directly-linked attributes and the number of owned products.
    ///
    /// Aggregates that were not requested come back as `NULL`.
    pub async fn list_for_tree(
        pool: &PgPool,
        include_attribute_count: bool,
        include_product_count: bool,
    ) -> Result<Vec<CategoryTreeRow>, sqlx::Error> {
        let query = tree_query(include_attribute_count, include_product_count);
        sqlx::query_as::<_, CategoryTreeRow>(&query)
            .fetch_all(pool)
            .await
    }
}

fn tree_query(include_attribute_count: bool, include_product_count: bool) -> String {
    let mut joins = Vec::new();

    let attribute_count = if include_attribute_count {
        joins.push(
            "LEFT JOIN category_attributes ca \
                ON ca.category_id = c.id AND ca.link_type = 'direct'",
        );
        "COUNT(DISTINCT ca.attribute_id)"
    } else {
        "NULL::BIGINT"
    };

    let product_count = if include_product_count {
        joins.push("LEFT JOIN products p ON p.category_id = c.id");
        "COUNT(DISTINCT p.id)"
    } else {
        "NULL::BIGINT"
    };

    format!(
        "SELECT {TREE_COLUMNS}, \
            {attribute_count} AS attribute_count, \
            {product_count} AS product_count \
         FROM categories c \
         {joins} \
         GROUP BY c.id \
         ORDER BY c.level, c.name, c.id",
        joins = joins.join(" "),
    )
}
