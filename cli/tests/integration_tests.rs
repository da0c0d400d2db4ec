use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

const BIN: &str = env!("CARGO_BIN_EXE_dao-sql");

/// Manifest with a composite-key table and an auto-increment table.
fn write_manifest(dir: &Path) -> PathBuf {
    let yaml = r#"
tables:
  - name: MultiPK
    primary_key: [ID, Type]
    columns:
      - { name: ID, kind: i64 }
      - { name: Type, kind: text }
      - { name: AValue, kind: text }
    rows:
      - { ID: 1, Type: a, AValue: "dfgd'fgfd" }
  - name: AllTypes
    primary_key: [ID]
    auto_increment: true
    columns:
      - { name: ID, kind: i64 }
      - { name: ABool, kind: bool }
      - name: Handle
        kind: !unsupported Chan
    rows:
      - { ABool: true, Handle: "0xc000" }
"#;
    let path = dir.join("tables.yaml");
    fs::write(&path, yaml).expect("failed to write manifest");
    path
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to run dao-sql")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

#[test]
fn create_prints_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&["create", "--manifest", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "CREATE TABLE IF NOT EXISTS MultiPK( ID integer, Type TEXT, AValue TEXT, PRIMARY KEY(ID, Type));\n\
         CREATE TABLE IF NOT EXISTS AllTypes( ID integer primary key AUTOINCREMENT, ABool TEXT, Handle TEXT);\n"
    );
}

#[test]
fn create_single_table() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&[
        "create",
        "--manifest",
        manifest.to_str().unwrap(),
        "--table",
        "MultiPK",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 1);
}

#[test]
fn drop_prints_statements() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&["drop", "--manifest", manifest.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "DROP TABLE IF EXISTS MultiPK;\nDROP TABLE IF EXISTS AllTypes;\n"
    );
}

#[test]
fn unknown_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&[
        "create",
        "--manifest",
        manifest.to_str().unwrap(),
        "--table",
        "Nope",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: table not found in manifest: Nope"));
}

// ---------------------------------------------------------------------------
// INSERT
// ---------------------------------------------------------------------------

#[test]
fn insert_reports_substituted_values() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&["insert", "--manifest", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "INSERT INTO MultiPK(ID, Type, AValue) VALUES (1, 'a', 'dfgd''fgfd');\n\
         INSERT INTO AllTypes(ABool, Handle) VALUES ('true', '');\n"
    );
    assert!(stderr(&output).contains("1 value(s) replaced with empty literals."));
}

#[test]
fn insert_strict_rejects_substitution() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&[
        "insert",
        "--manifest",
        manifest.to_str().unwrap(),
        "--strict",
    ]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("field Handle"));
}

// ---------------------------------------------------------------------------
// Queries and helpers
// ---------------------------------------------------------------------------

#[test]
fn select_single_key() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&[
        "select",
        "--manifest",
        manifest.to_str().unwrap(),
        "--table",
        "AllTypes",
        "--key",
        "pk_value",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "select * from AllTypes where ID = 'pk_value';\n"
    );
}

#[test]
fn select_composite_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&[
        "select",
        "--manifest",
        manifest.to_str().unwrap(),
        "--table",
        "MultiPK",
        "--key",
        "1",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("table MultiPK has 2 primary key columns"));
}

#[test]
fn validate_counts_tables_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let output = run(&["validate", "--manifest", manifest.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Validated 2 table(s) with 2 row(s).\n"
    );
}

#[test]
fn validate_reports_bad_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"tables": [{"name": "T", "primary_key": ["Missing"],
            "columns": [{"name": "Id", "kind": "i64"}]}]}"#,
    )
    .unwrap();

    let output = run(&["validate", "--manifest", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("primary key field not found: Missing"));
    assert!(err.contains("error: 1 problem(s) found"));
}

#[test]
fn select_rejects_unknown_key_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"tables": [{"name": "T", "primary_key": ["Missing"],
            "columns": [{"name": "Id", "kind": "i64"}]}]}"#,
    )
    .unwrap();

    let output = run(&[
        "select",
        "--manifest",
        path.to_str().unwrap(),
        "--table",
        "T",
        "--key",
        "1",
    ]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output)
            .contains("table T: invalid record descriptor: primary key field not found: Missing")
    );
}

#[test]
fn select_rejects_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nokey.json");
    fs::write(
        &path,
        r#"{"tables": [{"name": "T", "columns": [{"name": "Id", "kind": "i64"}]}]}"#,
    )
    .unwrap();

    let output = run(&[
        "select",
        "--manifest",
        path.to_str().unwrap(),
        "--table",
        "T",
        "--key",
        "1",
    ]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("primary key must name at least one field"));
    assert!(!err.contains("composite"));
}

#[test]
fn virtual_table() {
    let output = run(&[
        "virtual",
        "--table",
        "test",
        "--module",
        "csv",
        "--arg",
        "filename='thefile.csv'",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "CREATE VIRTUAL TABLE test USING csv(filename='thefile.csv');\n"
    );

    let output = run(&[
        "virtual",
        "--table",
        "test",
        "--module",
        "csv",
        "--temp",
        "--arg",
        "filename='thefile.csv'",
    ]);
    assert_eq!(
        stdout(&output),
        "CREATE VIRTUAL TABLE temp.test USING csv(filename='thefile.csv');\n"
    );
}

#[test]
fn missing_manifest_fails() {
    let output = run(&["create", "--manifest", "/nonexistent/tables.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load"));
}
