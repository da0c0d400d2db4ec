//! Record descriptor contract for SQLite statement generation.
//!
//! This crate defines how a record type describes itself to the statement
//! generator in `dao-sql-sqlite`:
//!
//! - [`Record`] — the contract: table name, ordered fields, primary key.
//! - [`Field`] — a column name, its declared [`FieldKind`] and live [`Value`].
//! - [`PrimaryKey`] — single, auto-increment or composite key policy.
//! - [`ToValue`] and [`Json`] — conversions from Rust field types.
//! - [`impl_record!`] — implements [`Record`] from an ordered field list.
//!
//! Validation ([`validate_record`]) catches duplicate columns, unknown key
//! columns and auto-increment on non-integer fields.
//!
//! # Example
//!
//! ```
//! use dao_sql_core::*;
//!
//! #[derive(serde::Serialize)]
//! struct Inner {
//!     a: i32,
//!     b: String,
//! }
//!
//! struct AllTypes {
//!     id: i64,
//!     name: String,
//!     inner: Json<Inner>,
//! }
//!
//! impl_record!(
//!     AllTypes,
//!     table = "AllTypes",
//!     primary_key = PrimaryKey::auto_increment("Id"),
//!     fields {
//!         id => "Id",
//!         name => "Name",
//!         inner => "Inner",
//!     }
//! );
//!
//! let row = AllTypes { id: 0, name: "x".into(), inner: Json(Inner { a: 1, b: "b".into() }) };
//! assert_eq!(row.fields()[2].kind, FieldKind::Struct);
//! assert!(validate_record(&row).is_empty());
//! ```

mod record;
mod types;
mod validate;

pub use record::{Json, Record, ToValue};
pub use types::*;
pub use validate::{DescriptorError, validate_record};
