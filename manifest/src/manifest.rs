//! Table manifests: column, key and row definitions loaded from YAML or JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! tables:
//!   - name: MultiPK
//!     primary_key: [ID, Type]
//!     columns:
//!       - { name: ID, kind: i64 }
//!       - { name: Type, kind: text }
//!       - { name: AValue, kind: text }
//!     rows:
//!       - { ID: 1, Type: a, AValue: "it's" }
//!   - name: Events
//!     primary_key: [Id]
//!     auto_increment: true
//!     columns:
//!       - { name: Id, kind: i64 }
//!       - { name: Payload, kind: struct }
//! ```

use std::collections::HashSet;
use std::io::BufReader;
use std::path::Path;

use dao_sql_core::{FieldKind, PrimaryKey};
use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, Result};
use crate::record::{DynamicRecord, convert_value};

/// One column of a manifest table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared value kind (`i64`, `u8`, `f32`, `bool`, `text`, `struct`, `seq`, ...).
    pub kind: FieldKind,
}

/// A table definition with optional rows to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Columns in table order.
    pub columns: Vec<ColumnDef>,
    /// Primary key columns in key order.
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Whether the single key column is assigned by the database.
    #[serde(default)]
    pub auto_increment: bool,
    /// Rows keyed by column name. Missing or `null` columns take the zero
    /// value of their kind.
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl TableDef {
    /// Builds the table's primary key.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidManifest`] if `auto_increment` is set
    /// on anything but a single-column key.
    pub fn primary_key(&self) -> Result<PrimaryKey> {
        if !self.auto_increment {
            return Ok(PrimaryKey::composite(self.primary_key.iter().cloned()));
        }
        match self.primary_key.as_slice() {
            [column] => Ok(PrimaryKey::auto_increment(column.clone())),
            columns => Err(ManifestError::InvalidManifest(format!(
                "table {}: auto_increment requires exactly one primary key column, found {}",
                self.name,
                columns.len()
            ))),
        }
    }

    /// Builds a record holding the zero value of every column.
    ///
    /// Used for schema-only statements such as `CREATE TABLE`.
    pub fn schema_record(&self) -> Result<DynamicRecord> {
        let primary_key = self.primary_key()?;
        let values = self
            .columns
            .iter()
            .map(|column| dao_sql_core::Value::zero(&column.kind))
            .collect();
        Ok(DynamicRecord::new(&self.name, &self.columns, values, primary_key))
    }

    /// Converts every row into a record, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidManifest`] for a row naming a column
    /// the table does not define, and [`ManifestError::ValueConversion`] for
    /// a value that does not fit its column's kind.
    pub fn records(&self) -> Result<Vec<DynamicRecord>> {
        let primary_key = self.primary_key()?;
        let known: HashSet<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();

        let mut records = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            if let Some(unknown) = row.keys().find(|key| !known.contains(key.as_str())) {
                return Err(ManifestError::InvalidManifest(format!(
                    "table {}, row {index}: unknown column {unknown}",
                    self.name
                )));
            }

            let values = self
                .columns
                .iter()
                .map(|column| convert_value(&self.name, column, row.get(&column.name)))
                .collect::<Result<Vec<_>>>()?;
            records.push(DynamicRecord::new(
                &self.name,
                &self.columns,
                values,
                primary_key.clone(),
            ));
        }

        tracing::debug!(table = %self.name, rows = records.len(), "converted manifest rows");
        Ok(records)
    }
}

/// A set of table definitions.
///
/// # Examples
///
/// ```
/// use dao_sql_manifest::Manifest;
///
/// let manifest = Manifest::from_yaml_str(
///     r#"
/// tables:
///   - name: Notes
///     primary_key: [Id]
///     auto_increment: true
///     columns:
///       - { name: Id, kind: i64 }
///       - { name: Body, kind: text }
///     rows:
///       - { Body: hello }
/// "#,
/// )
/// .unwrap();
///
/// let notes = manifest.table("Notes").unwrap();
/// assert_eq!(notes.records().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Table definitions in manifest order.
    pub tables: Vec<TableDef>,
}

impl Manifest {
    /// Loads a manifest from a file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ManifestError::IoError) if the file cannot be
    /// read, [`YamlError`](ManifestError::YamlError) or
    /// [`JsonError`](ManifestError::JsonError) if parsing fails, and
    /// [`InvalidManifest`](ManifestError::InvalidManifest) if two tables
    /// share a name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let manifest: Self = if is_yaml {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        manifest.check_unique_tables()?;
        tracing::debug!(path = %path.display(), tables = manifest.tables.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Parses a manifest from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.check_unique_tables()?;
        Ok(manifest)
    }

    /// Parses a manifest from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.check_unique_tables()?;
        Ok(manifest)
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns the named table, or every table when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnknownTable`] if `name` is not defined.
    pub fn select(&self, name: Option<&str>) -> Result<Vec<&TableDef>> {
        match name {
            Some(name) => self
                .table(name)
                .map(|table| vec![table])
                .ok_or_else(|| ManifestError::UnknownTable(name.to_string())),
            None => Ok(self.tables.iter().collect()),
        }
    }

    fn check_unique_tables(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(ManifestError::InvalidManifest(format!(
                    "duplicate table: {}",
                    table.name
                )));
            }
        }
        Ok(())
    }
}
