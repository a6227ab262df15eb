//! Normalized listing filters for attributes and products.
//!
//! The HTTP layer hands raw query values to the lenient parsers below; the
//! repositories only ever see these typed, already-coerced filters.

use std::collections::BTreeSet;

use crate::attribute::LinkType;
use crate::pagination::{PageRequest, SortOrder};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Lenient value parsers
// ---------------------------------------------------------------------------

/// Collect category ids from repeated and/or comma-separated values.
///
/// Values that are not integers are skipped. The result is deduplicated and
/// ascending.
pub fn parse_category_ids<'a, I>(values: I) -> Vec<DbId>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|v| v.split(','))
        .filter_map(|v| v.trim().parse::<DbId>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether any repeated or comma-separated value is non-blank.
pub fn has_nonblank_value<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|v| v.split(','))
        .any(|v| !v.trim().is_empty())
}

/// Collect link types from repeated and/or comma-separated values.
///
/// Unknown spellings are skipped. The result is deduplicated and in
/// precedence order.
pub fn parse_link_types<'a, I>(values: I) -> Vec<LinkType>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|v| v.split(','))
        .filter_map(|v| v.trim().to_ascii_lowercase().parse::<LinkType>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Interpret a query flag. `true`, `1`, `yes` and `on` (any case) are true;
/// everything else, including absence, is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.map(str::trim).is_some_and(|v| {
        ["true", "1", "yes", "on"]
            .iter()
            .any(|t| v.eq_ignore_ascii_case(t))
    })
}

/// Parse an integer query value, treating garbage as absent.
pub fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Sortable attribute columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeSortField {
    #[default]
    Name,
    Type,
    CreatedAt,
    ProductCount,
}

impl AttributeSortField {
    /// Parse a `sortBy` value; unknown values fall back to `name`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("type") => Self::Type,
            Some("created_at") | Some("createdAt") => Self::CreatedAt,
            Some("product_count") | Some("productCount") => Self::ProductCount,
            _ => Self::Name,
        }
    }
}

/// Which attribute universe a query resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// No categories selected: every attribute, annotated with its strongest
    /// stored link.
    Unscoped,
    /// Attributes linked inside the selected subtrees, on their ancestors, or
    /// globally.
    Applicable,
    /// The complement of [`ResolutionMode::Applicable`].
    NotApplicable,
}

/// Filter for the attribute listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeFilter {
    pub category_ids: Vec<DbId>,
    /// Empty means "any link type".
    pub link_types: Vec<LinkType>,
    pub not_applicable: bool,
    pub keyword: Option<String>,
    pub page: PageRequest,
    pub sort_by: AttributeSortField,
    pub sort_order: SortOrder,
}

impl AttributeFilter {
    pub fn mode(&self) -> ResolutionMode {
        match (self.category_ids.is_empty(), self.not_applicable) {
            (true, _) => ResolutionMode::Unscoped,
            (false, false) => ResolutionMode::Applicable,
            (false, true) => ResolutionMode::NotApplicable,
        }
    }

    /// Link types as their stored spellings, for binding.
    pub fn link_type_names(&self) -> Vec<String> {
        self.link_types.iter().map(|t| t.as_str().to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Sortable product columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    Name,
    /// The owning category's name.
    Category,
    CreatedAt,
}

impl ProductSortField {
    /// Parse a `sortBy` value; unknown values fall back to `name`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("category") => Self::Category,
            Some("created_at") | Some("createdAt") => Self::CreatedAt,
            _ => Self::Name,
        }
    }
}

/// Filter for the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    /// Products in these categories or any descendant. Empty means all,
    /// unless `category_filter_requested` is set.
    pub category_ids: Vec<DbId>,
    /// A category filter was supplied, even if none of its ids parsed.
    pub category_filter_requested: bool,
    pub keyword: Option<String>,
    pub page: PageRequest,
    pub sort_by: ProductSortField,
    pub sort_order: SortOrder,
}

impl ProductFilter {
    /// A category filter was asked for but left no usable id.
    pub fn selects_no_category(&self) -> bool {
        self.category_filter_requested && self.category_ids.is_empty()
    }
}
