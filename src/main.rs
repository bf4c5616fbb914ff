//! Command-line interface for clickhouse-bridge
//!
//! # Usage Examples
//!
//! ## Import
//! ```bash
//! # Infer a schema from users.csv, create `users` and load it in chunks of 5000
//! clickhouse-bridge import \
//!   --file users.csv --table users --chunk-size 5000 \
//!   --host ch.example.com --user loader --password "$TOKEN"
//!
//! # Read TSV from stdin, force `zip` to text, give up after 5 minutes
//! cat data.tsv | clickhouse-bridge import \
//!   --file - --table zips --delimiter tab \
//!   --schema-file overrides.yaml --timeout 5m
//! ```
//!
//! ## Export
//! ```bash
//! clickhouse-bridge export --table users --output users.csv
//! clickhouse-bridge export --query "SELECT id, name FROM users WHERE active"
//! ```
//!
//! ## Catalog
//! ```bash
//! clickhouse-bridge tables
//! clickhouse-bridge columns --table users
//! ```

use anyhow::Context;
use bridge_core::{Identifier, ImportSummary};
use clap::{Parser, Subcommand};
use clickhouse_bridge::csv::{
    export_query, export_table, import_delimited, Config, CsvInput, ExportOptions, ReaderOptions,
    TypeOverrides, DEFAULT_CHUNK_SIZE,
};
use clickhouse_bridge::{config::parse_duration, parse_delimiter, ClickHouseArgs};
use clickhouse_sink::{clickhouse_connect, ClickHouseOpts, ClickHouseSink};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "clickhouse-bridge")]
#[command(about = "Import delimited files into ClickHouse and export query results")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables in the database
    Tables {
        #[command(flatten)]
        conn: ClickHouseArgs,
    },

    /// Describe the columns of a table
    Columns {
        /// Table to describe
        #[arg(long)]
        table: String,

        #[command(flatten)]
        conn: ClickHouseArgs,
    },

    /// Write a query result or a whole table as delimited text
    #[group(id = "source", required = true, multiple = false, args = ["query", "table"])]
    Export {
        /// Query to run
        #[arg(long)]
        query: Option<String>,

        /// Table to dump
        #[arg(long)]
        table: Option<String>,

        /// Output file, or '-' for stdout
        #[arg(long, default_value = "-")]
        output: String,

        /// Field delimiter (single character, or 'tab')
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Do not write a header row
        #[arg(long)]
        no_headers: bool,

        #[command(flatten)]
        conn: ClickHouseArgs,
    },

    /// Create a table from a delimited file and load its rows
    Import {
        /// Input file, or '-' for stdin
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Target table name
        #[arg(long)]
        table: String,

        /// Field delimiter (single character, or 'tab')
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// The input has no header row
        #[arg(long)]
        no_headers: bool,

        /// Column names when --no-headers is set (comma-separated, e.g., "id,name,age")
        /// Must match the number of columns in the input
        #[arg(long, value_delimiter = ',', requires = "no_headers")]
        column_names: Option<Vec<String>>,

        /// Rows per insert call
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Give up after this long (e.g. "300", "30s", "5m", "1h")
        #[arg(long)]
        timeout: Option<String>,

        /// YAML file forcing column types (columns: { name: text })
        #[arg(long, value_name = "PATH")]
        schema_file: Option<PathBuf>,

        /// Infer the schema and print the DDL without connecting
        #[arg(long)]
        dry_run: bool,

        /// Emit metrics to this file during execution
        #[arg(long, value_name = "PATH")]
        emit_metrics: Option<PathBuf>,

        #[command(flatten)]
        conn: ClickHouseArgs,
    },
}

/// Caller-facing result of an import
#[derive(Serialize)]
struct ImportOutput {
    #[serde(flatten)]
    summary: ImportSummary,
    ddl: String,
    dry_run: bool,
}

#[derive(Serialize)]
struct ColumnOutput {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tables { conn } => {
            let sink = connect(&conn).await?;
            let tables = sink.list_tables().await.context("Failed to list tables")?;
            let mut stdout = std::io::stdout().lock();
            for table in tables {
                writeln!(stdout, "{table}")?;
            }
        }
        Commands::Columns { table, conn } => {
            let table = Identifier::parse(&table)?;
            let sink = connect(&conn).await?;
            let columns = sink
                .describe_table(&table)
                .await
                .with_context(|| format!("Failed to describe table {table}"))?;
            let output: Vec<ColumnOutput> = columns
                .into_iter()
                .map(|c| ColumnOutput {
                    name: c.name,
                    type_name: c.type_name,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Export {
            query,
            table,
            output,
            delimiter,
            no_headers,
            conn,
        } => {
            let sink = connect(&conn).await?;
            let writer: Box<dyn Write> = if output == "-" {
                Box::new(std::io::stdout().lock())
            } else {
                Box::new(
                    std::fs::File::create(&output)
                        .with_context(|| format!("Failed to create {output}"))?,
                )
            };
            let options = ExportOptions {
                delimiter,
                has_headers: !no_headers,
            };

            let rows = match (query, table) {
                (Some(query), _) => export_query(&sink, &query, writer, &options).await?,
                (None, Some(table)) => export_table(&sink, &table, writer, &options).await?,
                (None, None) => anyhow::bail!("Either --query or --table is required"),
            };
            tracing::info!("Wrote {} rows", rows);
        }
        Commands::Import {
            file,
            table,
            delimiter,
            no_headers,
            column_names,
            chunk_size,
            timeout,
            schema_file,
            dry_run,
            emit_metrics,
            conn,
        } => {
            let overrides = match schema_file {
                Some(path) => Some(
                    TypeOverrides::from_file(&path)
                        .with_context(|| format!("Failed to load schema overrides from {path:?}"))?,
                ),
                None => None,
            };

            let cancel = CancellationToken::new();
            if let Some(timeout) = timeout {
                let limit = parse_duration(&timeout)
                    .with_context(|| format!("Invalid timeout format: {timeout}"))?;
                let token = cancel.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(limit).await;
                    tracing::warn!("Import timed out after {:?}", limit);
                    token.cancel();
                });
            }

            let input = if file == "-" {
                CsvInput::Stdin
            } else {
                CsvInput::Path(PathBuf::from(file))
            };

            let config = Config {
                input,
                table,
                chunk_size,
                reader: ReaderOptions {
                    delimiter,
                    has_headers: !no_headers,
                    column_names,
                },
                overrides,
                emit_metrics,
                dry_run,
                cancel: Some(cancel.clone()),
            };

            let opts = ClickHouseOpts::from(&conn);
            let sink = if dry_run {
                // Only the dialect is needed
                ClickHouseSink::new(opts)?
            } else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        anyhow::bail!("Timed out connecting to {}", opts.endpoint())
                    }
                    sink = clickhouse_connect(&opts) => sink
                        .with_context(|| format!("Failed to connect to {}", opts.endpoint()))?,
                }
            };

            let report = import_delimited(&sink, &config).await?;
            let output = ImportOutput {
                summary: report.result.summary(),
                ddl: report.ddl,
                dry_run: report.dry_run,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

async fn connect(conn: &ClickHouseArgs) -> anyhow::Result<ClickHouseSink> {
    let opts = ClickHouseOpts::from(conn);
    clickhouse_connect(&opts)
        .await
        .with_context(|| format!("Failed to connect to {}", opts.endpoint()))
}
