use crate::types::DbId;

/// Domain errors raised while turning stored catalog data into API shapes.
///
/// Every variant describes data that violates the schema's expectations, so
/// the HTTP layer treats all of them as internal failures of the request.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Attribute {attribute_id} has malformed options: {reason}")]
    MalformedOptions { attribute_id: DbId, reason: String },

    #[error("Unknown attribute type: {0}")]
    UnknownAttributeType(String),

    #[error("Unknown link type: {0}")]
    UnknownLinkType(String),
}
