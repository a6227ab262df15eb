//! Attribute listing row and its API model.

use catalog_core::attribute::{parse_options, AttributeType, LinkType};
use catalog_core::error::CoreError;
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row produced by the attribute resolution query.
///
/// `link_type` and `category_path` are `NULL` when the attribute was not
/// resolved against any link row.
#[derive(Debug, Clone, FromRow)]
pub struct AttributeRow {
    pub id: DbId,
    pub name: String,
    pub attribute_type: String,
    pub description: Option<String>,
    pub options: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub link_type: Option<String>,
    pub category_path: Option<String>,
    pub product_count: i64,
}

/// An attribute annotated with how it relates to the queried categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeWithDetails {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_path: Option<String>,
    pub product_count: i64,
}

impl TryFrom<AttributeRow> for AttributeWithDetails {
    type Error = CoreError;

    fn try_from(row: AttributeRow) -> Result<Self, Self::Error> {
        let options = parse_options(row.id, row.options.as_deref())?;
        let attribute_type = row.attribute_type.parse::<AttributeType>()?;
        let link_type = row
            .link_type
            .as_deref()
            .map(str::parse::<LinkType>)
            .transpose()?;

        Ok(Self {
            id: row.id,
            name: row.name,
            attribute_type,
            description: row.description,
            options,
            created_at: row.created_at,
            updated_at: row.updated_at,
            link_type,
            category_path: row.category_path,
            product_count: row.product_count,
        })
    }
}
