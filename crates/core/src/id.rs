//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product as issued by the catalog API.
///
/// The API is not consistent about the JSON type of `id`: SQL-backed
/// backends emit integers, others emit strings. Both are accepted and
/// compared as-is (`Numeric(7)` and `Text("7")` are different identifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(u64),
    Text(String),
}

impl ProductId {
    /// Rejects blank textual identifiers.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ProductId::Numeric(_) => Ok(()),
            ProductId::Text(s) if s.trim().is_empty() => {
                Err(DomainError::invalid_id("ProductId: empty"))
            }
            ProductId::Text(_) => Ok(()),
        }
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductId::Numeric(n) => core::fmt::Display::fmt(n, f),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        match s.parse::<u64>() {
            Ok(n) => Ok(Self::Numeric(n)),
            Err(_) => Ok(Self::Text(s.to_string())),
        }
    }
}
