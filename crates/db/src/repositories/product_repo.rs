//! Repository for the `products` table.

use sqlx::PgPool;

use catalog_core::filter::{ProductFilter, ProductSortField};
use catalog_core::search::contains_pattern;

use super::bind::{bind_values, bind_values_scalar, BindValue, Binds};
use crate::models::product::ProductWithCategory;
use crate::models::Page;

/// Product columns joined with the owning category.
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.category_id, p.description, \
    c.name AS category_name, c.path AS category_path, p.created_at, p.updated_at";

/// Provides the product listing.
pub struct ProductRepo;

impl ProductRepo {
    /// Return one page of products for `filter`, together with the total
    /// number of matching products.
    ///
    /// A category filter matches products in the given categories or any of
    /// their descendants.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Page<ProductWithCategory>, sqlx::Error> {
        let (where_clause, values) = build_product_filter(filter);
        let next_idx = values.len() + 1;

        let data_sql = format!(
            "SELECT {PRODUCT_COLUMNS} \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             {where_clause} \
             ORDER BY {sort} {order}, p.id ASC \
             LIMIT ${next_idx} OFFSET ${offset_idx}",
            sort = sort_column(filter.sort_by),
            order = filter.sort_order.as_sql(),
            offset_idx = next_idx + 1,
        );
        let count_sql = format!(
            "SELECT COUNT(*) \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             {where_clause}"
        );

        let mut page_values = values.clone();
        page_values.push(BindValue::BigInt(filter.page.limit));
        page_values.push(BindValue::BigInt(filter.page.offset()));

        let rows = bind_values(
            sqlx::query_as::<_, ProductWithCategory>(&data_sql),
            &page_values,
        )
        .fetch_all(pool);
        let total =
            bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_sql), &values).fetch_one(pool);

        let (rows, total) = tokio::try_join!(rows, total)?;

        tracing::debug!(
            categories = filter.category_ids.len(),
            total,
            returned = rows.len(),
            "Product page fetched",
        );

        Ok(Page { rows, total })
    }
}

/// Build a WHERE clause and bind values from a `ProductFilter`.
///
/// The clause is empty if no filters are active, or starts with `WHERE `.
fn build_product_filter(filter: &ProductFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds = Binds::default();

    if filter.selects_no_category() {
        conditions.push("FALSE".to_string());
    }

    if !filter.category_ids.is_empty() {
        let ids = binds.push(BindValue::IdArray(filter.category_ids.clone()));
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM categories s \
                WHERE s.id = ANY({ids}) \
                AND (c.id = s.id OR c.path LIKE s.path || '/%'))"
        ));
    }

    if let Some(keyword) = filter.keyword.as_deref() {
        let pattern = binds.push(BindValue::Text(contains_pattern(keyword)));
        conditions.push(format!("p.name ILIKE {pattern}"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds.into_values())
}

fn sort_column(field: ProductSortField) -> &'static str {
    match field {
        ProductSortField::Name => "p.name",
        ProductSortField::Category => "c.name",
        ProductSortField::CreatedAt => "p.created_at",
    }
}
