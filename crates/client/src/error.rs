use storefront_core::DomainError;
use thiserror::Error;

/// Why a catalog load did not produce a usable catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid product record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: DomainError,
    },
    /// The session refused the load or the loaded catalog.
    #[error("catalog rejected: {0}")]
    Rejected(DomainError),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
