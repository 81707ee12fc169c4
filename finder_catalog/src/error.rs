//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent the building catalog from loading.
///
/// All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file does not exist.
    #[error("catalog file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Catalog file exists but could not be opened.
    #[error("failed to read catalog {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the data (e.g. invalid UTF-8).
    #[error("failed to parse catalog {}: {source}", path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file has no header row.
    #[error("catalog {} has no header row", path.display())]
    MissingHeader { path: PathBuf },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
