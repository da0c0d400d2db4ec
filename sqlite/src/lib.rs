//! SQLite statement generation for record descriptors.
//!
//! Given any type implementing [`Record`](dao_sql_core::Record), this crate
//! produces literal SQL text. Nothing is executed: callers hand the strings
//! to whatever SQLite connection they already hold.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`convert`** — field kind → column affinity, live value → SQL literal
//! - **`schema`** — `CREATE TABLE`, `DROP TABLE` and `CREATE VIRTUAL TABLE`
//! - **`insert`** — `INSERT INTO` with collected literal diagnostics
//! - **`query`** — `select` by single-column primary key
//!
//! # Quick start
//!
//! ```
//! use dao_sql_core::{Json, PrimaryKey, impl_record};
//! use dao_sql_sqlite::{create_table_sql, insert_sql};
//!
//! #[derive(serde::Serialize)]
//! struct Inner {
//!     #[serde(rename = "A")]
//!     a: i32,
//!     #[serde(rename = "B")]
//!     b: String,
//! }
//!
//! struct AllTypes {
//!     id: i64,
//!     a_bool: bool,
//!     a_string: String,
//!     inner: Json<Inner>,
//! }
//!
//! impl_record!(
//!     AllTypes,
//!     table = "AllTypes",
//!     primary_key = PrimaryKey::auto_increment("Id"),
//!     fields {
//!         id => "Id",
//!         a_bool => "ABool",
//!         a_string => "AString",
//!         inner => "InnerJson",
//!     }
//! );
//!
//! let row = AllTypes {
//!     id: 0,
//!     a_bool: true,
//!     a_string: "dfgd'fgfd".into(),
//!     inner: Json(Inner { a: 10, b: "Test".into() }),
//! };
//!
//! assert_eq!(
//!     create_table_sql(&row).unwrap(),
//!     "CREATE TABLE IF NOT EXISTS AllTypes( Id integer primary key AUTOINCREMENT, \
//!      ABool TEXT, AString TEXT, InnerJson TEXT); "
//! );
//! assert_eq!(
//!     insert_sql(&row).unwrap().sql,
//!     r#"INSERT INTO AllTypes(ABool, AString, InnerJson) VALUES ('true', 'dfgd''fgfd', '{"A":10,"B":"Test"}'); "#
//! );
//! ```
//!
//! # Known limitations
//!
//! There is no parameter binding. Text values are protected only by
//! doubling single quotes, and identifiers and virtual table module
//! arguments are emitted verbatim. Do not pass untrusted input through
//! either without checking it first.

mod convert;
mod error;
mod insert;
mod query;
mod schema;

pub use convert::{
    Affinity, DiagnosticReason, Literal, LiteralDiagnostic, affinity_for, escape_text,
    format_literal,
};
pub use error::{Result, SqlGenError};
pub use insert::{Statement, insert_batch_sql, insert_sql};
pub use query::{PrimaryKeyQuery, select_by_primary_key};
pub use schema::{VirtualTable, create_table_sql, create_virtual_table_sql, drop_table_sql};
