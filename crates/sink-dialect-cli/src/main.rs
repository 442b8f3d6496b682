//! sink-dialect CLI
//!
//! Prints the SQL and column types a database sink would use for a table,
//! without connecting to any database.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sink_dialect_core::{
    Dialect, DialectKind, DialectRegistry, StatementKind, UpsertRequest,
};

/// Dialect-aware SQL generation for database sinks.
#[derive(Parser)]
#[command(name = "sink-dialect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target database (mysql, postgresql, sqlite, sqlserver, oracle or a product name).
    #[arg(short, long, env = "SINK_DIALECT", global = true)]
    dialect: Option<String>,

    /// JDBC connection URL to derive the dialect from.
    #[arg(long, env = "SINK_JDBC_URL", global = true)]
    jdbc_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the insert-or-update statement for a table.
    Upsert(TableArgs),

    /// Print the plain INSERT statement for a table.
    Insert(TableArgs),

    /// Print the UPDATE-by-key statement for a table.
    Update(TableArgs),

    /// Print the native type of every logical type.
    Types,

    /// Print a quoted, possibly schema-qualified, table name.
    Quote {
        /// Table name, e.g. `public.users`.
        name: String,
    },

    /// Print one statement per request from a JSON file.
    Render {
        /// JSON array of `{"table", "columns", "key_columns"}` objects.
        #[arg(short, long)]
        file: PathBuf,

        /// Statement to generate (insert, upsert or update).
        #[arg(short, long, default_value = "upsert")]
        kind: StatementKind,
    },

    /// List the supported dialects.
    Dialects,
}

#[derive(Args)]
struct TableArgs {
    /// Target table, optionally schema-qualified.
    #[arg(short, long)]
    table: String,

    /// Non-key columns, comma separated, in bind order.
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Key columns, comma separated, in bind order.
    #[arg(short, long, value_delimiter = ',')]
    keys: Vec<String>,
}

impl TableArgs {
    fn into_request(self) -> UpsertRequest {
        UpsertRequest::new(self.table, non_blank(self.columns), non_blank(self.keys))
    }
}

/// Drops the empty entries `--columns ""` or `--columns a,,b` produce.
fn non_blank(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for generated SQL
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Dialects => {
            let registry = DialectRegistry::global()?;
            for d in registry.iter() {
                let (open, close) = d.quotes();
                println!(
                    "{:<10} {:<22} {open}identifier{close}",
                    d.name(),
                    d.kind().product_name()
                );
            }
        }

        Commands::Types => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            for (logical_type, native) in dialect.type_map().iter() {
                println!("{logical_type:<8} {native}");
            }
        }

        Commands::Quote { name } => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            println!("{}", dialect.handle_table_name(&name));
        }

        Commands::Upsert(args) => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            print_statement(dialect, StatementKind::Upsert, &args.into_request())?;
        }

        Commands::Insert(args) => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            print_statement(dialect, StatementKind::Insert, &args.into_request())?;
        }

        Commands::Update(args) => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            print_statement(dialect, StatementKind::Update, &args.into_request())?;
        }

        Commands::Render { file, kind } => {
            let dialect = resolve_dialect(cli.dialect.as_deref(), cli.jdbc_url.as_deref())?;
            let requests = load_requests(&file)?;
            info!(
                count = requests.len(),
                dialect = dialect.name(),
                kind = %kind,
                "Rendering statements"
            );
            for request in &requests {
                print_statement(dialect, kind, request)?;
            }
        }
    }

    Ok(())
}

fn resolve_dialect(
    name: Option<&str>,
    jdbc_url: Option<&str>,
) -> anyhow::Result<&'static Dialect> {
    let registry = DialectRegistry::global()?;
    let dialect = match (name, jdbc_url) {
        (Some(name), _) => registry.for_product(name)?,
        (None, Some(url)) => registry.for_jdbc_url(url)?,
        (None, None) => bail!(
            "No target database given. Use --dialect or --jdbc-url \
             (one of: {})",
            DialectKind::ALL.map(DialectKind::name).join(", ")
        ),
    };
    debug!(dialect = dialect.name(), "Resolved dialect");
    Ok(dialect)
}

fn load_requests(path: &Path) -> anyhow::Result<Vec<UpsertRequest>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse requests in {}", path.display()))
}

fn print_statement(
    dialect: &Dialect,
    kind: StatementKind,
    request: &UpsertRequest,
) -> anyhow::Result<()> {
    let sql = dialect
        .statement(kind, request)
        .with_context(|| format!("Cannot generate {kind} for table '{}'", request.table))?;
    println!("{sql}");
    Ok(())
}
