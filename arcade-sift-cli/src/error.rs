use thiserror::Error;

use arcade_sift_catalog::CatalogError;
use arcade_sift_lib::ConfigError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog normalization or lookup failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Curated configuration could not be loaded or is inconsistent
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Plan serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
