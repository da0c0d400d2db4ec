use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dao_sql_core::validate_record;
use dao_sql_manifest::{Manifest, TableDef};
use dao_sql_sqlite::{
    PrimaryKeyQuery, SqlGenError, VirtualTable, create_table_sql, drop_table_sql, insert_sql,
    select_by_primary_key,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "dao-sql")]
#[command(about = "Generate SQLite statements from table manifests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print CREATE TABLE statements for manifest tables.
    Create(TablesArgs),
    /// Print DROP TABLE statements for manifest tables.
    Drop(TablesArgs),
    /// Print INSERT statements for manifest rows.
    Insert(InsertArgs),
    /// Print a select-by-primary-key query for one table.
    Select(SelectArgs),
    /// Check manifest tables and rows without printing SQL.
    Validate(TablesArgs),
    /// Print a CREATE VIRTUAL TABLE statement.
    Virtual(VirtualArgs),
}

#[derive(Debug, Args)]
struct ManifestArgs {
    /// Path to a YAML (.yaml/.yml) or JSON manifest.
    #[arg(long)]
    manifest: PathBuf,
}

#[derive(Debug, Args)]
struct TablesArgs {
    #[command(flatten)]
    source: ManifestArgs,
    /// Only process this table.
    #[arg(long)]
    table: Option<String>,
}

#[derive(Debug, Args)]
struct InsertArgs {
    #[command(flatten)]
    tables: TablesArgs,
    /// Fail instead of substituting empty literals for unrenderable values.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct SelectArgs {
    #[command(flatten)]
    source: ManifestArgs,
    /// Table to query.
    #[arg(long)]
    table: String,
    /// Primary key value to look up.
    #[arg(long)]
    key: String,
}

#[derive(Debug, Args)]
struct VirtualArgs {
    /// Virtual table name.
    #[arg(long)]
    table: String,
    /// Module backing the table (e.g. csv, fts5).
    #[arg(long)]
    module: String,
    /// Create the table in the temp schema.
    #[arg(long)]
    temp: bool,
    /// Module argument, emitted verbatim. Repeat for several arguments.
    #[arg(long = "arg")]
    args: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Create(args) => run_create(args),
        Command::Drop(args) => run_drop(args),
        Command::Insert(args) => run_insert(args),
        Command::Select(args) => run_select(args),
        Command::Validate(args) => run_validate(args),
        Command::Virtual(args) => run_virtual(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only SQL. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn load_manifest(args: &ManifestArgs) -> Result<Manifest, String> {
    Manifest::load(&args.manifest)
        .map_err(|err| format!("Failed to load '{}': {err}", args.manifest.display()))
}

fn selected_tables<'a>(
    manifest: &'a Manifest,
    table: Option<&str>,
) -> Result<Vec<&'a TableDef>, String> {
    manifest.select(table).map_err(|err| err.to_string())
}

fn run_create(args: TablesArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.source)?;
    for table in selected_tables(&manifest, args.table.as_deref())? {
        let record = table.schema_record().map_err(|err| err.to_string())?;
        let sql = create_table_sql(&record).map_err(|err| format!("table {}: {err}", table.name))?;
        println!("{}", sql.trim_end());
    }
    Ok(())
}

fn run_drop(args: TablesArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.source)?;
    for table in selected_tables(&manifest, args.table.as_deref())? {
        let record = table.schema_record().map_err(|err| err.to_string())?;
        let sql = drop_table_sql(&record).map_err(|err| format!("table {}: {err}", table.name))?;
        println!("{}", sql.trim_end());
    }
    Ok(())
}

fn run_insert(args: InsertArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.tables.source)?;
    let mut statements = Vec::new();
    let mut diagnostics = Vec::new();

    for table in selected_tables(&manifest, args.tables.table.as_deref())? {
        for record in table.records().map_err(|err| err.to_string())? {
            let stmt = insert_sql(&record).map_err(|err| format!("table {}: {err}", table.name))?;
            diagnostics.extend(stmt.diagnostics);
            statements.push(stmt.sql);
        }
    }

    if args.strict && !diagnostics.is_empty() {
        let details: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        return Err(format!(
            "{} value(s) could not be rendered: {}",
            diagnostics.len(),
            details.join("; ")
        ));
    }

    for sql in &statements {
        println!("{}", sql.trim_end());
    }

    if !diagnostics.is_empty() {
        eprintln!(
            "{} value(s) replaced with empty literals.",
            diagnostics.len()
        );
    }

    Ok(())
}

fn run_select(args: SelectArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.source)?;
    let table = manifest
        .table(&args.table)
        .ok_or_else(|| format!("table not found in manifest: {}", args.table))?;
    let record = table.schema_record().map_err(|err| err.to_string())?;
    if let Some(err) = validate_record(&record).into_iter().next() {
        return Err(format!("table {}: {}", table.name, SqlGenError::from(err)));
    }

    match select_by_primary_key(&record, &args.key) {
        PrimaryKeyQuery::Query(sql) => {
            println!("{sql}");
            Ok(())
        }
        PrimaryKeyQuery::NotApplicable => Err(format!(
            "table {} has {} primary key columns; select by key needs exactly one",
            table.name,
            table.primary_key.len()
        )),
    }
}

fn run_validate(args: TablesArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.source)?;
    let tables = selected_tables(&manifest, args.table.as_deref())?;

    let mut problems = Vec::new();
    let mut row_count = 0usize;
    for table in &tables {
        match table.schema_record() {
            Ok(record) => problems.extend(
                validate_record(&record)
                    .into_iter()
                    .map(|err| format!("table {}: {err}", table.name)),
            ),
            Err(err) => problems.push(err.to_string()),
        }
        match table.records() {
            Ok(records) => row_count += records.len(),
            Err(err) => problems.push(err.to_string()),
        }
    }

    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {problem}");
        }
        return Err(format!("{} problem(s) found", problems.len()));
    }

    println!(
        "Validated {} table(s) with {row_count} row(s).",
        tables.len()
    );
    Ok(())
}

fn run_virtual(args: VirtualArgs) -> Result<(), String> {
    let mut table = VirtualTable::new(args.table, args.module).args(args.args);
    if args.temp {
        table = table.temp();
    }
    println!("{}", table.to_sql());
    Ok(())
}
