//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Storage layer error type
///
/// Only storage adapters produce these. The account store itself recovers
/// from every variant and keeps the cause for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum StoreError {
    /// Backend read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Write rejected because it would exceed the storage quota
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage is disabled or cannot be located on this platform
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether it is expected behavior (quota, disabled storage) rather than a fault, used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => true,
            Self::Storage(_) | Self::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Storage layer Result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;
