//! The record descriptor contract and value conversions.
//!
//! A type becomes usable by the statement generator by implementing
//! [`Record`]. Most types do this with [`impl_record!`](crate::impl_record),
//! which lists the struct fields in column order and converts each one with
//! [`ToValue`].

use serde::Serialize;

use crate::types::{Field, PrimaryKey, Value};

/// A record type that can describe its table, columns and key.
///
/// Field order is the column order of every generated statement, so
/// implementations must return fields in a stable order.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{Field, PrimaryKey, Record, Value};
///
/// struct Setting {
///     key: String,
///     value: String,
/// }
///
/// impl Record for Setting {
///     fn table_name(&self) -> &str {
///         "Settings"
///     }
///
///     fn fields(&self) -> Vec<Field> {
///         vec![
///             Field::new("Key", Value::Text(self.key.clone())),
///             Field::new("Value", Value::Text(self.value.clone())),
///         ]
///     }
///
///     fn primary_key(&self) -> PrimaryKey {
///         PrimaryKey::single("Key")
///     }
/// }
///
/// let setting = Setting { key: "theme".into(), value: "dark".into() };
/// assert_eq!(setting.fields().len(), 2);
/// ```
pub trait Record {
    /// Name of the backing table.
    fn table_name(&self) -> &str;

    /// Fields in declaration order, holding the instance's live values.
    fn fields(&self) -> Vec<Field>;

    /// Primary key policy of the table.
    fn primary_key(&self) -> PrimaryKey;
}

impl<T: Record + ?Sized> Record for &T {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }

    fn primary_key(&self) -> PrimaryKey {
        (**self).primary_key()
    }
}

/// Conversion of a Rust field value into a [`Value`].
///
/// Implemented for every primitive integer and float width, `bool`,
/// strings, `Vec<T>` of serializable items (a sequence) and [`Json`]
/// (a nested structured value).
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )+
    };
}

impl_to_value! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl<T: Serialize> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::sequence(self)
            .unwrap_or_else(|err| Value::opaque(std::any::type_name::<Self>(), err.to_string()))
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

/// Marks a field as a nested structured value stored as JSON text.
///
/// A value that fails to serialize becomes [`Value::Opaque`], which the
/// generator reports as a diagnostic instead of aborting.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{FieldKind, Json, ToValue};
///
/// #[derive(serde::Serialize)]
/// struct Inner { a: i32 }
///
/// assert_eq!(Json(Inner { a: 1 }).to_value().kind(), FieldKind::Struct);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> ToValue for Json<T> {
    fn to_value(&self) -> Value {
        Value::structured(&self.0)
            .unwrap_or_else(|err| Value::opaque(std::any::type_name::<T>(), err.to_string()))
    }
}

/// Implements [`Record`] for a struct from an ordered field list.
///
/// Each entry maps a struct field to its column name. Field values are
/// converted with [`ToValue`], so every listed field type must implement it.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{impl_record, PrimaryKey, Record};
///
/// struct MultiPk {
///     id: i64,
///     kind: String,
///     a_value: String,
/// }
///
/// impl_record!(
///     MultiPk,
///     table = "MultiPK",
///     primary_key = PrimaryKey::composite(["ID", "Type"]),
///     fields {
///         id => "ID",
///         kind => "Type",
///         a_value => "AValue",
///     }
/// );
///
/// let row = MultiPk { id: 1, kind: "a".into(), a_value: "b".into() };
/// assert_eq!(row.table_name(), "MultiPK");
/// assert_eq!(row.fields()[1].name, "Type");
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $ty:ty,
        table = $table:expr,
        primary_key = $pk:expr,
        fields { $($field:ident => $column:expr),+ $(,)? } $(,)?
    ) => {
        impl $crate::Record for $ty {
            fn table_name(&self) -> &str {
                $table
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::Field> {
                ::std::vec![
                    $($crate::Field::new($column, $crate::ToValue::to_value(&self.$field))),+
                ]
            }

            fn primary_key(&self) -> $crate::PrimaryKey {
                $pk
            }
        }
    };
}
