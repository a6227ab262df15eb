//! Repository for attribute resolution against the category hierarchy.
//!
//! Every listing is one data query plus one count query sharing the same
//! `WITH` prelude and `WHERE` clause. Candidate link rows live in a
//! `matches` CTE; `resolved` keeps the strongest match per attribute.

use sqlx::PgPool;

use catalog_core::attribute::LinkType;
use catalog_core::filter::{AttributeFilter, AttributeSortField, ResolutionMode};
use catalog_core::search::contains_pattern;

use super::bind::{bind_values, bind_values_scalar, BindValue, Binds};
use crate::models::attribute::AttributeRow;
use crate::models::Page;

/// Attribute columns shared by every resolution mode.
const ATTRIBUTE_COLUMNS: &str = "a.id, a.name, a.type AS attribute_type, a.description, \
    a.options, a.created_at, a.updated_at";

/// Distinct products holding a value for the attribute.
const PRODUCT_COUNT: &str = "(SELECT COUNT(DISTINCT pav.product_id) \
        FROM product_attribute_values pav \
        WHERE pav.attribute_id = a.id) AS product_count";

/// Sort key ranking `m.link_type` by [`LinkType::precedence`].
fn link_precedence() -> String {
    let arms: String = LinkType::ALL
        .iter()
        .map(|t| format!("WHEN '{}' THEN {} ", t.as_str(), t.precedence()))
        .collect();
    format!("CASE m.link_type {arms}END")
}

/// Every stored link row with its stored type.
const STORED_MATCHES: &str = "matches AS ( \
        SELECT ca.attribute_id, ca.link_type, c.path AS category_path \
        FROM category_attributes ca \
        JOIN categories c ON c.id = ca.category_id \
    )";

/// Provides the attribute listing.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Return one page of attributes for `filter`, together with the total
    /// number of matching attributes.
    ///
    /// The page and the count are fetched concurrently.
    pub async fn list(
        pool: &PgPool,
        filter: &AttributeFilter,
    ) -> Result<Page<AttributeRow>, sqlx::Error> {
        let query = AttributeQuery::build(filter);

        let rows = bind_values(
            sqlx::query_as::<_, AttributeRow>(&query.data_sql),
            &query.binds,
        )
        .fetch_all(pool);
        let total = bind_values_scalar(
            sqlx::query_scalar::<_, i64>(&query.count_sql),
            query.filter_binds(),
        )
        .fetch_one(pool);

        let (rows, total) = tokio::try_join!(rows, total)?;

        tracing::debug!(
            mode = ?filter.mode(),
            categories = filter.category_ids.len(),
            total,
            returned = rows.len(),
            "Attribute page resolved",
        );

        Ok(Page { rows, total })
    }
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

/// SQL text and bind values for one attribute listing.
#[derive(Debug)]
struct AttributeQuery {
    data_sql: String,
    count_sql: String,
    /// Filter binds followed by `LIMIT` and `OFFSET`.
    binds: Vec<BindValue>,
    /// Number of leading binds referenced by `count_sql`.
    filter_bind_count: usize,
}

impl AttributeQuery {
    fn build(filter: &AttributeFilter) -> Self {
        let mode = filter.mode();
        let mut binds = Binds::default();

        let matches = match mode {
            ResolutionMode::Unscoped => STORED_MATCHES.to_string(),
            ResolutionMode::Applicable | ResolutionMode::NotApplicable => {
                let ids = binds.push(BindValue::IdArray(filter.category_ids.clone()));
                scoped_matches(&ids)
            }
        };

        let link_types = (!filter.link_types.is_empty())
            .then(|| binds.push(BindValue::TextArray(filter.link_type_names())));

        let mut conditions: Vec<String> = Vec::new();
        let (prelude, link_columns, join) = match mode {
            ResolutionMode::NotApplicable => {
                conditions.push(
                    "NOT EXISTS (SELECT 1 FROM matches m WHERE m.attribute_id = a.id)".to_string(),
                );
                if let Some(types) = &link_types {
                    conditions.push(format!(
                        "EXISTS (SELECT 1 FROM category_attributes ca \
                            WHERE ca.attribute_id = a.id AND ca.link_type = ANY({types}))"
                    ));
                }
                (
                    format!("WITH {matches}"),
                    "NULL::TEXT AS link_type, NULL::TEXT AS category_path",
                    "",
                )
            }
            ResolutionMode::Applicable | ResolutionMode::Unscoped => {
                let resolved = resolved_cte(link_types.as_deref());
                // Unscoped listings keep attributes without any link row
                // unless a link-type filter demands one.
                let join = if mode == ResolutionMode::Unscoped && link_types.is_none() {
                    "LEFT JOIN resolved r ON r.attribute_id = a.id"
                } else {
                    "JOIN resolved r ON r.attribute_id = a.id"
                };
                (
                    format!("WITH {matches}, {resolved}"),
                    "r.link_type, r.category_path",
                    join,
                )
            }
        };

        if let Some(keyword) = filter.keyword.as_deref() {
            let pattern = binds.push(BindValue::Text(contains_pattern(keyword)));
            conditions.push(format!(
                "(a.name ILIKE {pattern} OR a.description ILIKE {pattern})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let filter_bind_count = binds.values().len();
        let limit = binds.push(BindValue::BigInt(filter.page.limit));
        let offset = binds.push(BindValue::BigInt(filter.page.offset()));

        let data_sql = format!(
            "{prelude} \
             SELECT {ATTRIBUTE_COLUMNS}, {link_columns}, {PRODUCT_COUNT} \
             FROM attributes a {join} \
             {where_clause} \
             ORDER BY {sort} {order}, a.id ASC \
             LIMIT {limit} OFFSET {offset}",
            sort = sort_column(filter.sort_by),
            order = filter.sort_order.as_sql(),
        );
        let count_sql = format!(
            "{prelude} \
             SELECT COUNT(*) FROM attributes a {join} \
             {where_clause}"
        );

        Self {
            data_sql,
            count_sql,
            binds: binds.into_values(),
            filter_bind_count,
        }
    }

    fn filter_binds(&self) -> &[BindValue] {
        &self.binds[..self.filter_bind_count]
    }
}

/// Link rows relevant to the selected categories.
///
/// A global row always matches. Any other row matches when it sits on a
/// selected category or inside a selected subtree (keeping its stored
/// type), or on an ancestor of a selection (resolved as `inherited`).
fn scoped_matches(ids: &str) -> String {
    format!(
        "selected AS ( \
            SELECT id, path FROM categories WHERE id = ANY({ids}) \
         ), \
         matches AS ( \
            SELECT ca.attribute_id, \
                CASE \
                    WHEN ca.link_type = 'global' THEN 'global' \
                    WHEN EXISTS ( \
                        SELECT 1 FROM selected s \
                        WHERE s.id = c.id OR c.path LIKE s.path || '/%' \
                    ) THEN ca.link_type \
                    ELSE 'inherited' \
                END AS link_type, \
                c.path AS category_path \
            FROM category_attributes ca \
            JOIN categories c ON c.id = ca.category_id \
            WHERE ca.link_type = 'global' \
               OR EXISTS ( \
                    SELECT 1 FROM selected s \
                    WHERE s.id = c.id \
                       OR c.path LIKE s.path || '/%' \
                       OR s.path LIKE c.path || '/%' \
               ) \
         )"
    )
}

/// Strongest match per attribute, after the optional link-type filter.
fn resolved_cte(link_types: Option<&str>) -> String {
    let filter = link_types
        .map(|types| format!("WHERE m.link_type = ANY({types})"))
        .unwrap_or_default();
    let precedence = link_precedence();
    format!(
        "resolved AS ( \
            SELECT DISTINCT ON (m.attribute_id) \
                m.attribute_id, m.link_type, m.category_path \
            FROM matches m \
            {filter} \
            ORDER BY m.attribute_id, {precedence}, m.category_path \
         )"
    )
}

fn sort_column(field: AttributeSortField) -> &'static str {
    match field {
        AttributeSortField::Name => "a.name",
        AttributeSortField::Type => "a.type",
        AttributeSortField::CreatedAt => "a.created_at",
        AttributeSortField::ProductCount => "product_count",
    }
}
