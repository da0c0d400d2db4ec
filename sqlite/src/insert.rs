//! `INSERT` statement generation from a record's live values.
//!
//! Columns and values come from a single traversal of the record's fields,
//! so the Nth column always pairs with the Nth literal. The primary key
//! column is left out only when the key is a single auto-increment column;
//! composite keys and caller-assigned keys are always listed.

use std::fmt;

use dao_sql_core::Record;

use crate::convert::{LiteralDiagnostic, format_literal};
use crate::error::Result;
use crate::schema::ensure_valid;

/// Generated SQL together with the values that could not be rendered.
///
/// `Display` prints the SQL only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    /// The SQL text.
    pub sql: String,
    /// One entry per field value replaced by an empty literal.
    pub diagnostics: Vec<LiteralDiagnostic>,
}

impl Statement {
    /// Returns `true` if every value was rendered.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Appends another statement's SQL and diagnostics.
    pub fn append(&mut self, other: Statement) {
        self.sql.push_str(&other.sql);
        self.diagnostics.extend(other.diagnostics);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Generates the `INSERT INTO` statement for one record instance.
///
/// A record whose only field is its auto-increment key yields
/// `INSERT INTO T() VALUES (); `, which SQLite rejects. Callers inserting
/// such rows need `INSERT INTO T DEFAULT VALUES` instead.
///
/// # Errors
///
/// Returns [`SqlGenError::InvalidDescriptor`](crate::SqlGenError::InvalidDescriptor)
/// if the record fails validation, or
/// [`SqlGenError::KindMismatch`](crate::SqlGenError::KindMismatch) if a
/// field's value does not match its declared kind.
///
/// # Examples
///
/// ```
/// use dao_sql_core::{PrimaryKey, impl_record};
/// use dao_sql_sqlite::insert_sql;
///
/// struct Note { id: i64, body: String }
/// impl_record!(
///     Note,
///     table = "Notes",
///     primary_key = PrimaryKey::auto_increment("Id"),
///     fields { id => "Id", body => "Body" }
/// );
///
/// let stmt = insert_sql(&Note { id: 0, body: "it's".into() }).unwrap();
/// assert_eq!(stmt.sql, "INSERT INTO Notes(Body) VALUES ('it''s'); ");
/// assert!(stmt.is_clean());
/// ```
pub fn insert_sql(record: &dyn Record) -> Result<Statement> {
    ensure_valid(record)?;

    let table = record.table_name();
    let primary_key = record.primary_key();

    let mut columns = Vec::new();
    let mut values = Vec::new();
    let mut diagnostics = Vec::new();

    for field in record.fields() {
        if primary_key.skips(&field.name) {
            continue;
        }
        let literal = format_literal(&field)?;
        values.push(literal.as_sql().to_string());
        if let Some(diagnostic) = literal.diagnostic() {
            diagnostics.push(diagnostic.clone());
        }
        columns.push(field.name);
    }

    let sql = format!(
        "INSERT INTO {table}({}) VALUES ({}); ",
        columns.join(", "),
        values.join(", ")
    );
    tracing::debug!(
        table,
        columns = columns.len(),
        diagnostics = diagnostics.len(),
        "generated insert statement"
    );

    Ok(Statement { sql, diagnostics })
}

/// Generates one `INSERT INTO` statement per record, concatenated.
///
/// # Errors
///
/// Fails on the first record [`insert_sql`] rejects.
pub fn insert_batch_sql<I, R>(records: I) -> Result<Statement>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    let mut batch = Statement::default();
    for record in records {
        batch.append(insert_sql(&record)?);
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dao_sql_core::{Field, FieldKind, PrimaryKey, Value, impl_record};

    use crate::SqlGenError;
    use crate::convert::DiagnosticReason;

    struct Row {
        id: i64,
        name: String,
        score: f64,
    }

    impl_record!(
        Row,
        table = "Rows",
        primary_key = PrimaryKey::auto_increment("Id"),
        fields {
            id => "Id",
            name => "Name",
            score => "Score",
        }
    );

    struct Tail {
        name: String,
        id: i64,
    }

    impl_record!(
        Tail,
        table = "Tail",
        primary_key = PrimaryKey::auto_increment("Id"),
        fields {
            name => "Name",
            id => "Id",
        }
    );

    struct Pair {
        id: i64,
        kind: String,
        a_value: String,
    }

    impl_record!(
        Pair,
        table = "MultiPK",
        primary_key = PrimaryKey::composite(["ID", "Type"]),
        fields {
            id => "ID",
            kind => "Type",
            a_value => "AValue",
        }
    );

    struct Loose {
        fields: Vec<Field>,
    }

    impl Record for Loose {
        fn table_name(&self) -> &str {
            "Loose"
        }

        fn fields(&self) -> Vec<Field> {
            self.fields.clone()
        }

        fn primary_key(&self) -> PrimaryKey {
            PrimaryKey::single("Id")
        }
    }

    #[test]
    fn test_auto_increment_key_skipped() {
        let stmt = insert_sql(&Row {
            id: 99,
            name: "a".into(),
            score: 1.5,
        })
        .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO Rows(Name, Score) VALUES ('a', 1.5); ");
    }

    #[test]
    fn test_skipped_key_last_leaves_no_trailing_comma() {
        let stmt = insert_sql(&Tail {
            name: "z".into(),
            id: 1,
        })
        .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO Tail(Name) VALUES ('z'); ");
    }

    #[test]
    fn test_key_only_record_has_empty_lists() {
        struct Counter {
            id: i64,
        }

        impl_record!(
            Counter,
            table = "Counter",
            primary_key = PrimaryKey::auto_increment("Id"),
            fields { id => "Id" }
        );

        let stmt = insert_sql(&Counter { id: 7 }).unwrap();
        assert_eq!(stmt.sql, "INSERT INTO Counter() VALUES (); ");
    }

    #[test]
    fn test_composite_key_fully_listed() {
        let stmt = insert_sql(&Pair {
            id: 10,
            kind: "t".into(),
            a_value: "v".into(),
        })
        .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO MultiPK(ID, Type, AValue) VALUES (10, 't', 'v'); "
        );
    }

    #[test]
    fn test_caller_assigned_key_listed() {
        let stmt = insert_sql(&Loose {
            fields: vec![
                Field::new("Id", Value::I64(10)),
                Field::new("Note", Value::Text("x".into())),
            ],
        })
        .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO Loose(Id, Note) VALUES (10, 'x'); ");
    }

    #[test]
    fn test_unsupported_value_collected() {
        let stmt = insert_sql(&Loose {
            fields: vec![
                Field::new("Id", Value::I64(1)),
                Field::new("Handle", Value::opaque("Chan", "0xc000")),
                Field::new("Note", Value::Text("x".into())),
            ],
        })
        .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO Loose(Id, Handle, Note) VALUES (1, '', 'x'); "
        );
        assert!(!stmt.is_clean());
        assert_eq!(stmt.diagnostics.len(), 1);
        assert_eq!(stmt.diagnostics[0].field, "Handle");
        assert_eq!(stmt.diagnostics[0].reason, DiagnosticReason::UnsupportedKind);
    }

    #[test]
    fn test_kind_mismatch_aborts() {
        let result = insert_sql(&Loose {
            fields: vec![
                Field::new("Id", Value::I64(1)),
                Field::with_kind("Count", FieldKind::U32, Value::Bool(true)),
            ],
        });
        assert!(matches!(result, Err(SqlGenError::KindMismatch { .. })));
    }

    #[test]
    fn test_batch_concatenates() {
        let rows = vec![
            Row {
                id: 0,
                name: "a".into(),
                score: 1.0,
            },
            Row {
                id: 0,
                name: "b".into(),
                score: 2.0,
            },
        ];
        let batch = insert_batch_sql(&rows).unwrap();
        assert_eq!(
            batch.sql,
            "INSERT INTO Rows(Name, Score) VALUES ('a', 1); INSERT INTO Rows(Name, Score) VALUES ('b', 2); "
        );
        assert_eq!(batch.to_string(), batch.sql);
    }
}
