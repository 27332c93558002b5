//! Datasource identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DATASOURCE_PRIMARY, DATASOURCE_SECONDARY};
use crate::error::DomainError;

/// One of the two independently configured backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Datasource {
    Primary,
    Secondary,
}

impl Datasource {
    /// Every datasource, in display order.
    pub const ALL: [Datasource; 2] = [Datasource::Primary, Datasource::Secondary];

    /// Lowercase name used in routes and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Datasource::Primary => DATASOURCE_PRIMARY,
            Datasource::Secondary => DATASOURCE_SECONDARY,
        }
    }

    /// Prefix used for this datasource's environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Datasource::Primary => "PRIMARY",
            Datasource::Secondary => "SECONDARY",
        }
    }
}

impl fmt::Display for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datasource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            DATASOURCE_PRIMARY => Ok(Datasource::Primary),
            DATASOURCE_SECONDARY => Ok(Datasource::Secondary),
            other => Err(DomainError::validation(format!("Unknown datasource '{}'", other))),
        }
    }
}
