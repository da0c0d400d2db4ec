//! Error types for statement generation.
//!
//! Generation only fails for malformed descriptors. Values that merely
//! cannot be rendered are reported as
//! [`LiteralDiagnostic`](crate::LiteralDiagnostic)s instead.

use dao_sql_core::{DescriptorError, FieldKind};
use thiserror::Error;

/// Errors that can occur while generating SQL for a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlGenError {
    /// The record description is structurally invalid.
    #[error("invalid record descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    /// A field's live value does not match its declared kind.
    #[error("field {field} is declared as {declared} but holds a {actual} value")]
    KindMismatch {
        field: String,
        declared: FieldKind,
        actual: FieldKind,
    },
}

/// Convenience alias for results with [`SqlGenError`].
pub type Result<T> = std::result::Result<T, SqlGenError>;
