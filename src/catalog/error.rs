//! Catalog loading errors.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`super::ContentCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog parsed but one of its tables is malformed.
    #[error("Validation error: {0}")]
    Validation(String),
}
