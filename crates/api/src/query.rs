//! Query-string normalization for the listing endpoints.
//!
//! Handlers extract the raw pairs (`Query<Vec<(String, String)>>`) so that
//! repeated keys such as `categoryNodes=1&categoryNodes=3` and the bracketed
//! `categoryNodes[]=1` form are both preserved. Every value is parsed
//! leniently: garbage falls back to a default, it is never rejected.

use catalog_core::filter::{
    has_nonblank_value, parse_category_ids, parse_flag, parse_link_types, parse_number,
    AttributeFilter, AttributeSortField, ProductFilter, ProductSortField,
};
use catalog_core::pagination::{PageRequest, SortOrder};
use catalog_core::search::normalize_keyword;

/// Raw query pairs in request order.
pub type QueryPairs = Vec<(String, String)>;

/// All values for `name`, accepting the `name[]` spelling too.
fn values<'a>(pairs: &'a [(String, String)], name: &'a str) -> impl Iterator<Item = &'a str> {
    pairs.iter().filter_map(move |(key, value)| {
        let key = key.strip_suffix("[]").unwrap_or(key);
        (key == name).then_some(value.as_str())
    })
}

/// The first value for `name`.
fn first<'a>(pairs: &'a [(String, String)], name: &'a str) -> Option<&'a str> {
    values(pairs, name).next()
}

fn page_request(pairs: &[(String, String)]) -> PageRequest {
    PageRequest::new(
        parse_number(first(pairs, "page")),
        parse_number(first(pairs, "limit")),
    )
}

/// Build the attribute filter from `GET /api/attributes` parameters.
pub fn attribute_filter(pairs: &[(String, String)]) -> AttributeFilter {
    AttributeFilter {
        category_ids: parse_category_ids(values(pairs, "categoryNodes")),
        link_types: parse_link_types(values(pairs, "linkType")),
        not_applicable: parse_flag(first(pairs, "notApplicable")),
        keyword: normalize_keyword(first(pairs, "keyword")),
        page: page_request(pairs),
        sort_by: AttributeSortField::parse_lenient(first(pairs, "sortBy")),
        sort_order: SortOrder::parse_lenient(first(pairs, "sortOrder")),
    }
}

/// Build the product filter from `GET /api/products` parameters.
///
/// A `categoryId` whose ids all fail to parse still counts as a filter, so
/// it selects no products rather than the whole catalog.
pub fn product_filter(pairs: &[(String, String)]) -> ProductFilter {
    ProductFilter {
        category_ids: parse_category_ids(values(pairs, "categoryId")),
        category_filter_requested: has_nonblank_value(values(pairs, "categoryId")),
        keyword: normalize_keyword(first(pairs, "keyword")),
        page: page_request(pairs),
        sort_by: ProductSortField::parse_lenient(first(pairs, "sortBy")),
        sort_order: SortOrder::parse_lenient(first(pairs, "sortOrder")),
    }
}

/// Aggregates requested for the category tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeOptions {
    pub include_attribute_count: bool,
    pub include_product_count: bool,
}

/// Read the `GET /api/categories/tree` flags.
pub fn tree_options(pairs: &[(String, String)]) -> TreeOptions {
    TreeOptions {
        include_attribute_count: parse_flag(first(pairs, "includeAttributeCount")),
        include_product_count: parse_flag(first(pairs, "includeProductCount")),
    }
}
