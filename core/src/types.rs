//! Record descriptor type definitions.
//!
//! This module defines the data model a record type uses to describe itself
//! to the statement generator: the declared kind of each field, the live value
//! it holds, and the primary key policy of the table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared value kind of a record field.
///
/// Integer kinds cover every signed and unsigned width, float kinds both
/// widths. Nested structures and sequences are stored as JSON text.
/// [`FieldKind::Unsupported`] names a type the generator cannot render.
///
/// # Examples
///
/// ```
/// use dao_sql_core::FieldKind;
///
/// assert!(FieldKind::U16.is_integer());
/// assert!(FieldKind::F32.is_float());
/// assert_eq!(FieldKind::Text.to_string(), "text");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    Text,
    /// Nested structured value, serialized as a JSON object.
    Struct,
    /// Sequence of structured values, serialized as a JSON array.
    Seq,
    /// A type with no SQL literal form, carrying its type name.
    Unsupported(String),
}

impl FieldKind {
    /// Returns `true` for every signed and unsigned integer width.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::Usize
        )
    }

    /// Returns `true` for both floating point widths.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Struct => "struct",
            Self::Seq => "seq",
            Self::Unsupported(type_name) => return write!(f, "unsupported({type_name})"),
        };
        f.write_str(name)
    }
}

/// Live value held by a record field at generation time.
///
/// There is one variant per [`FieldKind`]. Nested values keep their JSON
/// form so they can be rendered as text literals later.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Bool(bool),
    Text(String),
    Struct(serde_json::Value),
    Seq(Vec<serde_json::Value>),
    /// Value of an unsupported kind, kept only for diagnostics.
    Opaque { type_name: String, repr: String },
}

impl Value {
    /// Builds a nested structured value from any serializable type.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `value` cannot be serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use dao_sql_core::{FieldKind, Value};
    ///
    /// #[derive(serde::Serialize)]
    /// struct Inner { a: i32, b: String }
    ///
    /// let value = Value::structured(&Inner { a: 10, b: "Test".into() }).unwrap();
    /// assert_eq!(value.kind(), FieldKind::Struct);
    /// ```
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self::Struct)
    }

    /// Builds a sequence value from a slice of serializable items.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error of the first item that fails to serialize.
    pub fn sequence<T: Serialize>(items: &[T]) -> serde_json::Result<Self> {
        items
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()
            .map(Self::Seq)
    }

    /// Wraps a value of a type that has no SQL literal form.
    pub fn opaque(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Self::Opaque {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }

    /// Returns the zero value of `kind`, used for schema-only records.
    ///
    /// Unsupported kinds map to an empty [`Value::Opaque`].
    pub fn zero(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::I8 => Self::I8(0),
            FieldKind::I16 => Self::I16(0),
            FieldKind::I32 => Self::I32(0),
            FieldKind::I64 => Self::I64(0),
            FieldKind::Isize => Self::Isize(0),
            FieldKind::U8 => Self::U8(0),
            FieldKind::U16 => Self::U16(0),
            FieldKind::U32 => Self::U32(0),
            FieldKind::U64 => Self::U64(0),
            FieldKind::Usize => Self::Usize(0),
            FieldKind::F32 => Self::F32(0.0),
            FieldKind::F64 => Self::F64(0.0),
            FieldKind::Bool => Self::Bool(false),
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Struct => Self::Struct(serde_json::Value::Object(serde_json::Map::new())),
            FieldKind::Seq => Self::Seq(Vec::new()),
            FieldKind::Unsupported(type_name) => Self::opaque(type_name.clone(), ""),
        }
    }

    /// Returns the kind this value belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::I8(_) => FieldKind::I8,
            Self::I16(_) => FieldKind::I16,
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::Isize(_) => FieldKind::Isize,
            Self::U8(_) => FieldKind::U8,
            Self::U16(_) => FieldKind::U16,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::Usize(_) => FieldKind::Usize,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Bool(_) => FieldKind::Bool,
            Self::Text(_) => FieldKind::Text,
            Self::Struct(_) => FieldKind::Struct,
            Self::Seq(_) => FieldKind::Seq,
            Self::Opaque { type_name, .. } => FieldKind::Unsupported(type_name.clone()),
        }
    }
}

/// A single field of a record: column name, declared kind and live value.
///
/// Use [`Field::new`] to infer the kind from the value, or
/// [`Field::with_kind`] when the kind is declared separately (for example
/// by a manifest). The generator rejects fields whose declared kind and
/// value disagree.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{Field, FieldKind, Value};
///
/// let field = Field::new("Aint64", Value::I64(1234));
/// assert_eq!(field.kind, FieldKind::I64);
/// assert!(field.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Column name, unique within the record.
    pub name: String,
    /// Declared value kind.
    pub kind: FieldKind,
    /// Value held by the record instance.
    pub value: Value,
}

impl Field {
    /// Creates a field whose kind is taken from `value`.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        let kind = value.kind();
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    /// Creates a field with an explicitly declared kind.
    pub fn with_kind(name: impl Into<String>, kind: FieldKind, value: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    /// Returns `true` if the live value matches the declared kind.
    pub fn is_consistent(&self) -> bool {
        self.value.kind() == self.kind
    }
}

/// Primary key policy of a record.
///
/// A non-empty ordered list of column names. Auto-increment can only be
/// requested through [`PrimaryKey::auto_increment`], so a composite key is
/// never auto-incremented.
///
/// # Examples
///
/// ```
/// use dao_sql_core::PrimaryKey;
///
/// let pk = PrimaryKey::auto_increment("Id");
/// assert!(pk.skips("Id"));
///
/// let pk = PrimaryKey::composite(["ID", "Type"]);
/// assert!(pk.is_composite());
/// assert!(!pk.skips("ID"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    columns: Vec<String>,
    auto_increment: bool,
}

impl PrimaryKey {
    /// Single-column key assigned by the caller.
    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
            auto_increment: false,
        }
    }

    /// Single-column key assigned by the database on insert.
    pub fn auto_increment(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
            auto_increment: true,
        }
    }

    /// Multi-column key, listed in key order.
    ///
    /// A one-element list is equivalent to [`PrimaryKey::single`]. An empty
    /// list is reported by [`validate_record`](crate::validate_record).
    pub fn composite<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            auto_increment: false,
        }
    }

    /// Key columns in declared key order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if the key has exactly one column.
    pub fn is_single(&self) -> bool {
        self.columns.len() == 1
    }

    /// Returns `true` if the key has two or more columns.
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }

    /// Returns `true` if the database assigns the key.
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment && self.is_single()
    }

    /// The key column when the key is single, `None` otherwise.
    pub fn single_column(&self) -> Option<&str> {
        match self.columns.as_slice() {
            [column] => Some(column.as_str()),
            _ => None,
        }
    }

    /// Returns `true` if `column` is part of the key.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Returns `true` if `column` is left out of INSERT statements.
    pub fn skips(&self, column: &str) -> bool {
        self.is_auto_increment() && self.single_column() == Some(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_kinds() {
        for kind in [
            FieldKind::I8,
            FieldKind::I16,
            FieldKind::I32,
            FieldKind::I64,
            FieldKind::Isize,
            FieldKind::U8,
            FieldKind::U16,
            FieldKind::U32,
            FieldKind::U64,
            FieldKind::Usize,
        ] {
            assert!(kind.is_integer(), "{kind} should be an integer kind");
            assert!(!kind.is_float());
        }
        assert!(!FieldKind::Bool.is_integer());
        assert!(!FieldKind::Text.is_integer());
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: FieldKind = serde_json::from_str("\"i64\"").unwrap();
        assert_eq!(kind, FieldKind::I64);
        let kind: FieldKind = serde_json::from_str("\"struct\"").unwrap();
        assert_eq!(kind, FieldKind::Struct);
        assert_eq!(serde_json::to_string(&FieldKind::Seq).unwrap(), "\"seq\"");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Usize.to_string(), "usize");
        assert_eq!(
            FieldKind::Unsupported("HashMap".into()).to_string(),
            "unsupported(HashMap)"
        );
    }

    #[test]
    fn test_value_kind_roundtrip_through_zero() {
        for kind in [
            FieldKind::I8,
            FieldKind::U64,
            FieldKind::F32,
            FieldKind::Bool,
            FieldKind::Text,
            FieldKind::Struct,
            FieldKind::Seq,
            FieldKind::Unsupported("Chan".into()),
        ] {
            assert_eq!(Value::zero(&kind).kind(), kind);
        }
    }

    #[test]
    fn test_structured_and_sequence() {
        #[derive(Serialize)]
        struct Inner {
            a: i32,
        }

        let value = Value::structured(&Inner { a: 1 }).unwrap();
        assert_eq!(value, Value::Struct(serde_json::json!({"a": 1})));

        let value = Value::sequence(&[Inner { a: 1 }, Inner { a: 2 }]).unwrap();
        assert_eq!(
            value,
            Value::Seq(vec![serde_json::json!({"a": 1}), serde_json::json!({"a": 2})])
        );
    }

    #[test]
    fn test_field_consistency() {
        assert!(Field::new("A", Value::Bool(true)).is_consistent());
        assert!(!Field::with_kind("A", FieldKind::I64, Value::Text("x".into())).is_consistent());
    }

    #[test]
    fn test_primary_key_single() {
        let pk = PrimaryKey::single("SomeId");
        assert!(pk.is_single());
        assert!(!pk.is_composite());
        assert!(!pk.is_auto_increment());
        assert_eq!(pk.single_column(), Some("SomeId"));
        assert!(!pk.skips("SomeId"));
    }

    #[test]
    fn test_primary_key_auto_increment() {
        let pk = PrimaryKey::auto_increment("Id");
        assert!(pk.is_auto_increment());
        assert!(pk.skips("Id"));
        assert!(!pk.skips("Other"));
    }

    #[test]
    fn test_primary_key_composite() {
        let pk = PrimaryKey::composite(["ID", "Type"]);
        assert!(pk.is_composite());
        assert_eq!(pk.columns(), ["ID".to_string(), "Type".to_string()]);
        assert_eq!(pk.single_column(), None);
        assert!(pk.contains("Type"));
        assert!(!pk.contains("AValue"));
        assert!(!pk.is_auto_increment());
    }

    #[test]
    fn test_primary_key_empty() {
        let pk = PrimaryKey::composite(Vec::<String>::new());
        assert!(!pk.is_single());
        assert!(!pk.is_composite());
        assert_eq!(pk.single_column(), None);
    }
}
