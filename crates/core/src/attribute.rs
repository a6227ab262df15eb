//! Attribute and link-type vocabulary.
//!
//! Attribute types and link types are stored as TEXT guarded by CHECK
//! constraints; these enums are the typed view of those columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Attribute type
// ---------------------------------------------------------------------------

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeType {
    Text,
    Number,
    Boolean,
    Select,
    MultiSelect,
}

impl AttributeType {
    pub const ALL: [AttributeType; 5] = [
        AttributeType::Text,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Select,
        AttributeType::MultiSelect,
    ];

    /// The stored (and serialized) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Select => "select",
            AttributeType::MultiSelect => "multi-select",
        }
    }
}

impl FromStr for AttributeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownAttributeType(s.to_string()))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Link type
// ---------------------------------------------------------------------------

/// How an attribute relates to a category.
///
/// Variants are declared in resolution precedence order: when one attribute
/// matches a category selection in several ways, the lowest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Direct,
    Inherited,
    Global,
}

impl LinkType {
    pub const ALL: [LinkType; 3] = [LinkType::Direct, LinkType::Inherited, LinkType::Global];

    pub fn as_str(self) -> &'static str {
        match self {
            LinkType::Direct => "direct",
            LinkType::Inherited => "inherited",
            LinkType::Global => "global",
        }
    }

    /// Position in the resolution order (0 = strongest).
    pub fn precedence(self) -> i32 {
        match self {
            LinkType::Direct => 0,
            LinkType::Inherited => 1,
            LinkType::Global => 2,
        }
    }
}

impl FromStr for LinkType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownLinkType(s.to_string()))
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Decode the stored `options` column (a JSON array of strings).
///
/// `NULL`, blank text and a JSON `null` all mean "no options". Anything else
/// that is not an array of strings is reported as
/// [`CoreError::MalformedOptions`] rather than being dropped.
pub fn parse_options(
    attribute_id: DbId,
    raw: Option<&str>,
) -> Result<Option<Vec<String>>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    serde_json::from_str::<Option<Vec<String>>>(raw).map_err(|e| CoreError::MalformedOptions {
        attribute_id,
        reason: e.to_string(),
    })
}
