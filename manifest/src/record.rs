//! Runtime records built from manifest rows.

use dao_sql_core::{Field, FieldKind, PrimaryKey, Record, Value};

use crate::error::{ManifestError, Result};
use crate::manifest::ColumnDef;

/// A record whose columns and values were defined at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    table: String,
    fields: Vec<Field>,
    primary_key: PrimaryKey,
}

impl DynamicRecord {
    /// Pairs each column with its value, in column order.
    pub(crate) fn new(
        table: &str,
        columns: &[ColumnDef],
        values: Vec<Value>,
        primary_key: PrimaryKey,
    ) -> Self {
        let fields = columns
            .iter()
            .zip(values)
            .map(|(column, value)| Field::with_kind(&column.name, column.kind.clone(), value))
            .collect();
        Self {
            table: table.to_string(),
            fields,
            primary_key,
        }
    }
}

impl Record for DynamicRecord {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn fields(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn primary_key(&self) -> PrimaryKey {
        self.primary_key.clone()
    }
}

/// Converts a row cell into a value of the column's declared kind.
///
/// A missing or `null` cell becomes the kind's zero value. Integers are
/// range-checked against the column's width, and `f32` columns reject
/// values that overflow to infinity.
pub(crate) fn convert_value(
    table: &str,
    column: &ColumnDef,
    cell: Option<&serde_json::Value>,
) -> Result<Value> {
    let cell = match cell {
        None | Some(serde_json::Value::Null) => return Ok(Value::zero(&column.kind)),
        Some(cell) => cell,
    };

    let mismatch = || ManifestError::ValueConversion {
        table: table.to_string(),
        column: column.name.clone(),
        kind: column.kind.clone(),
        value: cell.to_string(),
    };

    let signed = || cell.as_i64().ok_or_else(mismatch);
    let unsigned = || cell.as_u64().ok_or_else(mismatch);

    let value = match &column.kind {
        FieldKind::I8 => Value::I8(i8::try_from(signed()?).map_err(|_| mismatch())?),
        FieldKind::I16 => Value::I16(i16::try_from(signed()?).map_err(|_| mismatch())?),
        FieldKind::I32 => Value::I32(i32::try_from(signed()?).map_err(|_| mismatch())?),
        FieldKind::I64 => Value::I64(signed()?),
        FieldKind::Isize => Value::Isize(isize::try_from(signed()?).map_err(|_| mismatch())?),
        FieldKind::U8 => Value::U8(u8::try_from(unsigned()?).map_err(|_| mismatch())?),
        FieldKind::U16 => Value::U16(u16::try_from(unsigned()?).map_err(|_| mismatch())?),
        FieldKind::U32 => Value::U32(u32::try_from(unsigned()?).map_err(|_| mismatch())?),
        FieldKind::U64 => Value::U64(unsigned()?),
        FieldKind::Usize => Value::Usize(usize::try_from(unsigned()?).map_err(|_| mismatch())?),
        FieldKind::F32 => {
            let wide = cell.as_f64().ok_or_else(mismatch)?;
            let narrow = wide as f32;
            if wide.is_finite() && !narrow.is_finite() {
                return Err(mismatch());
            }
            Value::F32(narrow)
        }
        FieldKind::F64 => Value::F64(cell.as_f64().ok_or_else(mismatch)?),
        FieldKind::Bool => Value::Bool(cell.as_bool().ok_or_else(mismatch)?),
        FieldKind::Text => Value::Text(cell.as_str().ok_or_else(mismatch)?.to_string()),
        FieldKind::Struct => Value::Struct(cell.clone()),
        FieldKind::Seq => Value::Seq(cell.as_array().ok_or_else(mismatch)?.clone()),
        FieldKind::Unsupported(type_name) => Value::opaque(type_name.clone(), cell.to_string()),
    };
    Ok(value)
}
