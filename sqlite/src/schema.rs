//! DDL generation for record tables and virtual tables.
//!
//! [`create_table_sql`] derives a `CREATE TABLE IF NOT EXISTS` statement
//! from a record's field list and primary key:
//!
//! ```text
//! CREATE TABLE IF NOT EXISTS AllTypes( Id integer primary key AUTOINCREMENT, AString TEXT);
//! CREATE TABLE IF NOT EXISTS MultiPK( ID integer, Type TEXT, AValue TEXT, PRIMARY KEY(ID, Type));
//! ```
//!
//! A single-column key is marked inline on its column. A composite key gets
//! a trailing `PRIMARY KEY(...)` clause listing the columns in key order.
//! Output depends only on the record's shape, never on field values.
//!
//! Virtual tables ([`VirtualTable`]) take their module arguments verbatim;
//! quoting them is the caller's responsibility.

use dao_sql_core::{Record, validate_record};

use crate::convert::affinity_for;
use crate::error::Result;

/// Fails with the first structural problem of `record`, if any.
pub(crate) fn ensure_valid(record: &dyn Record) -> Result<()> {
    match validate_record(record).into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Generates the `CREATE TABLE IF NOT EXISTS` statement for a record type.
///
/// # Errors
///
/// Returns [`SqlGenError::InvalidDescriptor`](crate::SqlGenError::InvalidDescriptor)
/// if the record fails [`validate_record`].
pub fn create_table_sql(record: &dyn Record) -> Result<String> {
    ensure_valid(record)?;

    let table = record.table_name();
    let primary_key = record.primary_key();
    let single_key = primary_key.single_column();

    let mut columns: Vec<String> = record
        .fields()
        .iter()
        .map(|field| {
            let mut column = format!("{} {}", field.name, affinity_for(&field.kind));
            if single_key == Some(field.name.as_str()) {
                column.push_str(" primary key");
                if primary_key.is_auto_increment() {
                    column.push_str(" AUTOINCREMENT");
                }
            }
            column
        })
        .collect();

    if primary_key.is_composite() {
        columns.push(format!("PRIMARY KEY({})", primary_key.columns().join(", ")));
    }

    let sql = format!("CREATE TABLE IF NOT EXISTS {table}( {}); ", columns.join(", "));
    tracing::debug!(table, sql = %sql, "generated create statement");
    Ok(sql)
}

/// Generates the `DROP TABLE IF EXISTS` statement for a record type.
///
/// # Errors
///
/// Returns [`SqlGenError::InvalidDescriptor`](crate::SqlGenError::InvalidDescriptor)
/// if the record fails [`validate_record`].
pub fn drop_table_sql(record: &dyn Record) -> Result<String> {
    ensure_valid(record)?;
    Ok(format!("DROP TABLE IF EXISTS {}; ", record.table_name()))
}

/// Builder for `CREATE VIRTUAL TABLE` statements.
///
/// # Examples
///
/// ```
/// use dao_sql_sqlite::VirtualTable;
///
/// let sql = VirtualTable::new("test", "csv")
///     .temp()
///     .arg("filename='thefile.csv'")
///     .to_sql();
/// assert_eq!(sql, "CREATE VIRTUAL TABLE temp.test USING csv(filename='thefile.csv');");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualTable {
    name: String,
    module: String,
    temp: bool,
    args: Vec<String>,
}

impl VirtualTable {
    /// Starts a virtual table named `name` backed by `module`.
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            temp: false,
            args: Vec::new(),
        }
    }

    /// Places the table in the `temp` schema.
    pub fn temp(mut self) -> Self {
        self.temp = true;
        self
    }

    /// Appends one module argument, emitted verbatim.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several module arguments, emitted verbatim.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Renders the statement.
    pub fn to_sql(&self) -> String {
        let schema = if self.temp { "temp." } else { "" };
        format!(
            "CREATE VIRTUAL TABLE {schema}{} USING {}({});",
            self.name,
            self.module,
            self.args.join(",")
        )
    }
}

/// Generates a `CREATE VIRTUAL TABLE` statement.
///
/// Module arguments are joined with commas and not escaped.
///
/// # Examples
///
/// ```
/// use dao_sql_sqlite::create_virtual_table_sql;
///
/// let sql = create_virtual_table_sql("test", "csv", false, &["filename='thefile.csv'"]);
/// assert_eq!(sql, "CREATE VIRTUAL TABLE test USING csv(filename='thefile.csv');");
/// ```
pub fn create_virtual_table_sql<S: AsRef<str>>(
    table: &str,
    module: &str,
    temp: bool,
    args: &[S],
) -> String {
    let mut builder = VirtualTable::new(table, module).args(args.iter().map(|arg| arg.as_ref()));
    if temp {
        builder = builder.temp();
    }
    builder.to_sql()
}
