//! YAML and JSON table manifests for dao-sql statement generation.
//!
//! A manifest describes tables (columns with declared kinds, primary key,
//! auto-increment policy) and optional rows. Each table converts into
//! [`DynamicRecord`]s, which implement [`Record`](dao_sql_core::Record) and
//! can be handed to the generator in `dao-sql-sqlite` like any compiled
//! record type.
//!
//! # Quick start
//!
//! ```no_run
//! use dao_sql_core::Record;
//! use dao_sql_manifest::Manifest;
//!
//! let manifest = Manifest::load("tables.yaml").unwrap();
//! for table in &manifest.tables {
//!     let schema = table.schema_record().unwrap();
//!     println!("{} has {} columns", schema.table_name(), schema.fields().len());
//!     for record in table.records().unwrap() {
//!         println!("  row with {} values", record.fields().len());
//!     }
//! }
//! ```

mod error;
mod manifest;
mod record;

pub use error::{ManifestError, Result};
pub use manifest::{ColumnDef, Manifest, TableDef};
pub use record::DynamicRecord;
