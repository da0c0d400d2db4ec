//! Conversion of field kinds and live values into SQL text.
//!
//! Covers the two per-field conversions the statement assemblers need:
//!
//! - [`affinity_for`] maps a declared [`FieldKind`] to its SQLite column
//!   affinity for `CREATE TABLE`.
//! - [`format_literal`] renders a field's live value as a literal for
//!   `INSERT`.
//!
//! # Escaping
//!
//! Text, nested structures and sequences are wrapped in single quotes with
//! every embedded `'` doubled. This is the only escaping performed; there is
//! no parameter binding, so untrusted text is only as safe as quote doubling
//! makes it.

use std::fmt;

use dao_sql_core::{Field, FieldKind, Value};
use thiserror::Error;

use crate::error::{Result, SqlGenError};

/// SQLite column affinity emitted in `CREATE TABLE` column definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    Integer,
    Real,
    Text,
}

impl Affinity {
    /// The keyword written into column definitions.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Returns the column affinity for a field kind.
///
/// Integers of every width are `integer`, floats are `REAL`, and everything
/// else (booleans, text, nested values, unsupported kinds) is `TEXT`.
///
/// # Examples
///
/// ```
/// use dao_sql_core::FieldKind;
/// use dao_sql_sqlite::{Affinity, affinity_for};
///
/// assert_eq!(affinity_for(&FieldKind::U64), Affinity::Integer);
/// assert_eq!(affinity_for(&FieldKind::F32).as_sql(), "REAL");
/// assert_eq!(affinity_for(&FieldKind::Struct).as_sql(), "TEXT");
/// ```
pub fn affinity_for(kind: &FieldKind) -> Affinity {
    if kind.is_integer() {
        Affinity::Integer
    } else if kind.is_float() {
        Affinity::Real
    } else {
        Affinity::Text
    }
}

/// Wraps text in single quotes, doubling every embedded quote.
///
/// # Examples
///
/// ```
/// assert_eq!(dao_sql_sqlite::escape_text("dfgd'fgfd"), "'dfgd''fgfd'");
/// ```
pub fn escape_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Why a field value could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticReason {
    /// The field's kind has no literal form.
    #[error("unsupported kind")]
    UnsupportedKind,
    /// NaN or an infinity, which SQLite has no literal for.
    #[error("non-finite float")]
    NonFiniteFloat,
    /// A nested value failed to serialize to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// A field value that was replaced by an empty text literal.
///
/// Collected on the generated [`Statement`](crate::Statement) so callers can
/// decide whether a partially rendered statement is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for field {field} (kind: {kind}, value: {value}): {reason}")]
pub struct LiteralDiagnostic {
    /// Column name of the field.
    pub field: String,
    /// Declared kind of the field.
    pub kind: FieldKind,
    /// Debug rendering of the value that could not be formatted.
    pub value: String,
    /// What went wrong.
    pub reason: DiagnosticReason,
}

/// Outcome of rendering one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// SQL literal text, ready to be placed in a `VALUES` list.
    Rendered(String),
    /// The value could not be rendered; `''` stands in for it.
    Invalid(LiteralDiagnostic),
}

impl Literal {
    /// Literal text for a `VALUES` list. Invalid values render as `''`.
    pub fn as_sql(&self) -> &str {
        match self {
            Self::Rendered(sql) => sql,
            Self::Invalid(_) => "''",
        }
    }

    /// The diagnostic, if the value could not be rendered.
    pub fn diagnostic(&self) -> Option<&LiteralDiagnostic> {
        match self {
            Self::Rendered(_) => None,
            Self::Invalid(diagnostic) => Some(diagnostic),
        }
    }
}

/// Renders a field's live value as a SQL literal.
///
/// | Kind | Literal |
/// |------|---------|
/// | integers | bare decimal digits |
/// | floats | shortest round-trip decimal, never exponent notation |
/// | `bool` | `'true'` / `'false'` |
/// | text | quoted, quotes doubled |
/// | struct / seq | quoted compact JSON, quotes doubled |
/// | unsupported | [`Literal::Invalid`] |
///
/// # Errors
///
/// Returns [`SqlGenError::KindMismatch`] if the field's value does not
/// belong to its declared kind.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{Field, Value};
/// use dao_sql_sqlite::format_literal;
///
/// let literal = format_literal(&Field::new("AString", Value::Text("it's".into()))).unwrap();
/// assert_eq!(literal.as_sql(), "'it''s'");
///
/// let literal = format_literal(&Field::new("ABool", Value::Bool(true))).unwrap();
/// assert_eq!(literal.as_sql(), "'true'");
/// ```
pub fn format_literal(field: &Field) -> Result<Literal> {
    if !field.is_consistent() {
        return Err(SqlGenError::KindMismatch {
            field: field.name.clone(),
            declared: field.kind.clone(),
            actual: field.value.kind(),
        });
    }

    let invalid = |reason: DiagnosticReason| {
        Literal::Invalid(LiteralDiagnostic {
            field: field.name.clone(),
            kind: field.kind.clone(),
            value: format!("{:?}", field.value),
            reason,
        })
    };

    let literal = match &field.value {
        Value::I8(v) => Literal::Rendered(v.to_string()),
        Value::I16(v) => Literal::Rendered(v.to_string()),
        Value::I32(v) => Literal::Rendered(v.to_string()),
        Value::I64(v) => Literal::Rendered(v.to_string()),
        Value::Isize(v) => Literal::Rendered(v.to_string()),
        Value::U8(v) => Literal::Rendered(v.to_string()),
        Value::U16(v) => Literal::Rendered(v.to_string()),
        Value::U32(v) => Literal::Rendered(v.to_string()),
        Value::U64(v) => Literal::Rendered(v.to_string()),
        Value::Usize(v) => Literal::Rendered(v.to_string()),
        Value::F32(v) if v.is_finite() => Literal::Rendered(v.to_string()),
        Value::F64(v) if v.is_finite() => Literal::Rendered(v.to_string()),
        Value::F32(_) | Value::F64(_) => invalid(DiagnosticReason::NonFiniteFloat),
        Value::Bool(v) => Literal::Rendered(escape_text(if *v { "true" } else { "false" })),
        Value::Text(text) => Literal::Rendered(escape_text(text)),
        Value::Struct(json) => match serde_json::to_string(json) {
            Ok(text) => Literal::Rendered(escape_text(&text)),
            Err(err) => invalid(DiagnosticReason::Serialization(err.to_string())),
        },
        Value::Seq(items) => match serde_json::to_string(items) {
            Ok(text) => Literal::Rendered(escape_text(&text)),
            Err(err) => invalid(DiagnosticReason::Serialization(err.to_string())),
        },
        Value::Opaque { .. } => invalid(DiagnosticReason::UnsupportedKind),
    };

    if let Literal::Invalid(diagnostic) = &literal {
        tracing::warn!(
            field = %diagnostic.field,
            kind = %diagnostic.kind,
            value = %diagnostic.value,
            reason = %diagnostic.reason,
            "invalid field value replaced with empty literal"
        );
    }

    Ok(literal)
}
