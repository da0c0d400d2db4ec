//! Lookup queries by primary key.
//!
//! Only single-column keys are supported. For a composite key the builder
//! returns [`PrimaryKeyQuery::NotApplicable`] instead of a query, and
//! callers must check for it.

use dao_sql_core::Record;

use crate::convert::escape_text;

/// Result of [`select_by_primary_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKeyQuery {
    /// The generated `select` statement.
    Query(String),
    /// The record's key is not a single column.
    NotApplicable,
}

impl PrimaryKeyQuery {
    /// The query text, or `None` when not applicable.
    pub fn as_sql(&self) -> Option<&str> {
        match self {
            Self::Query(sql) => Some(sql),
            Self::NotApplicable => None,
        }
    }

    /// Returns `true` if a query was generated.
    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

/// Builds `select * from <table> where <key> = '<value>';`.
///
/// The key value is always quoted as text, with embedded quotes doubled.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{PrimaryKey, impl_record};
/// use dao_sql_sqlite::{PrimaryKeyQuery, select_by_primary_key};
///
/// struct AllTypes { id: i64 }
/// impl_record!(AllTypes, table = "AllTypes", primary_key = PrimaryKey::single("ID"), fields { id => "ID" });
///
/// assert_eq!(
///     select_by_primary_key(&AllTypes { id: 0 }, "pk_value"),
///     PrimaryKeyQuery::Query("select * from AllTypes where ID = 'pk_value';".into()),
/// );
/// ```
pub fn select_by_primary_key(record: &dyn Record, key: &str) -> PrimaryKeyQuery {
    let primary_key = record.primary_key();
    let Some(column) = primary_key.single_column() else {
        tracing::debug!(
            table = record.table_name(),
            key_columns = primary_key.columns().len(),
            "select by primary key needs a single key column"
        );
        return PrimaryKeyQuery::NotApplicable;
    };

    PrimaryKeyQuery::Query(format!(
        "select * from {} where {column} = {};",
        record.table_name(),
        escape_text(key)
    ))
}
