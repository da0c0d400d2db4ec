//! Record descriptor validation.
//!
//! Catches structural problems in a [`Record`] description, such as
//! duplicate columns or a primary key naming a missing field, before any
//! SQL is generated from it.
//!
//! # Examples
//!
//! ```
//! use dao_sql_core::*;
//!
//! struct Row { id: i64 }
//! impl_record!(Row, table = "Rows", primary_key = PrimaryKey::auto_increment("Id"), fields { id => "Id" });
//! assert!(validate_record(&Row { id: 0 }).is_empty());
//!
//! struct Broken { id: i64 }
//! impl_record!(Broken, table = "Rows", primary_key = PrimaryKey::single("Missing"), fields { id => "Id" });
//! assert_eq!(
//!     validate_record(&Broken { id: 0 }),
//!     vec![DescriptorError::UnknownPrimaryKeyField("Missing".into())],
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::Record;

/// Structural problems in a record descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Table name is empty or whitespace-only.
    #[error("table name cannot be empty")]
    EmptyTableName,
    /// The record lists no fields.
    #[error("record for table {0} has no fields")]
    NoFields(String),
    /// A field name is empty or whitespace-only.
    #[error("field name cannot be empty")]
    EmptyFieldName,
    /// Two fields share a column name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),
    /// The primary key lists no columns.
    #[error("primary key must name at least one field")]
    EmptyPrimaryKey,
    /// A primary key column is not one of the record's fields.
    #[error("primary key field not found: {0}")]
    UnknownPrimaryKeyField(String),
    /// A primary key column is listed twice.
    #[error("duplicate primary key field: {0}")]
    DuplicatePrimaryKeyField(String),
    /// Auto-increment requested on a field that is not an integer.
    #[error("auto-increment primary key must be an integer field: {0}")]
    AutoIncrementNotInteger(String),
}

/// Validates a record descriptor.
///
/// Returns every problem found, in field order. An empty list means the
/// record can be used for statement generation.
pub fn validate_record(record: &dyn Record) -> Vec<DescriptorError> {
    let mut errors = Vec::new();

    let table = record.table_name();
    if table.trim().is_empty() {
        errors.push(DescriptorError::EmptyTableName);
    }

    let fields = record.fields();
    if fields.is_empty() {
        errors.push(DescriptorError::NoFields(table.to_string()));
    }

    let mut seen_fields: HashSet<&str> = HashSet::new();
    for field in &fields {
        if field.name.trim().is_empty() {
            errors.push(DescriptorError::EmptyFieldName);
            continue;
        }
        if !seen_fields.insert(field.name.as_str()) {
            errors.push(DescriptorError::DuplicateField(field.name.clone()));
        }
    }

    let primary_key = record.primary_key();
    if primary_key.columns().is_empty() {
        errors.push(DescriptorError::EmptyPrimaryKey);
    }

    let mut seen_keys: HashSet<&str> = HashSet::new();
    for column in primary_key.columns() {
        if !seen_keys.insert(column.as_str()) {
            errors.push(DescriptorError::DuplicatePrimaryKeyField(column.clone()));
            continue;
        }
        if !seen_fields.contains(column.as_str()) {
            errors.push(DescriptorError::UnknownPrimaryKeyField(column.clone()));
        }
    }

    if primary_key.is_auto_increment() {
        let column = primary_key.single_column().unwrap_or_default();
        if let Some(field) = fields.iter().find(|f| f.name == column) {
            if !field.kind.is_integer() {
                errors.push(DescriptorError::AutoIncrementNotInteger(column.to_string()));
            }
        }
    }

    errors
}
