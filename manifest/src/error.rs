//! Error types for manifest loading and row conversion.

use dao_sql_core::FieldKind;
use thiserror::Error;

/// Errors that can occur while loading a manifest or building its records.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Structural problem in the manifest (e.g., an unknown row column).
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// A row value does not fit the column's declared kind.
    #[error("table {table}, column {column}: cannot convert {value} to {kind}")]
    ValueConversion {
        table: String,
        column: String,
        kind: FieldKind,
        value: String,
    },

    /// A requested table is not defined in the manifest.
    #[error("table not found in manifest: {0}")]
    UnknownTable(String),
}

/// Convenience alias for results with [`ManifestError`].
pub type Result<T> = std::result::Result<T, ManifestError>;
