//! CLI error types.

use slides_config::ConfigError;
use slides_pdf::ExportError;
use slides_store::StoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("File watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("{0}")]
    Validation(String),
}
