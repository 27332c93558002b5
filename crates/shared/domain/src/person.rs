//! Person domain entity.

use serde::{Deserialize, Serialize};

/// A person record. Identical in shape in both datasources.
///
/// The `id` is assigned by the caller and is the primary key within a
/// single datasource; nothing links records across datasources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Person {
    /// Caller-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
