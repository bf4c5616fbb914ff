//! Import entry points: delimited input → table in a sink.

use crate::error::ImportError;
use crate::loader::{BatchLoader, DEFAULT_CHUNK_SIZE};
use crate::metrics::MetricsCollector;
use crate::overrides::TypeOverrides;
use crate::reader::{read_raw_table, ReaderOptions};
use crate::schema::{create_table, plan_import, ImportPlan};
use bridge_core::{ImportResult, RawTable};
use std::path::PathBuf;
use std::time::Duration;
use table_sink::TableSink;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const METRICS_INTERVAL: Duration = Duration::from_secs(1);

/// Where delimited input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvInput {
    Path(PathBuf),
    Stdin,
}

/// Configuration for a delimited-file import
#[derive(Debug, Clone)]
pub struct Config {
    pub input: CsvInput,

    /// Target table name, validated as an identifier
    pub table: String,

    /// Number of rows sent per insert call
    pub chunk_size: usize,

    pub reader: ReaderOptions,

    /// Storage types forced for named columns
    pub overrides: Option<TypeOverrides>,

    /// Optional path to emit JSONL progress metrics during the load
    pub emit_metrics: Option<PathBuf>,

    /// Plan the import and report the DDL without touching the sink
    pub dry_run: bool,

    pub cancel: Option<CancellationToken>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: CsvInput::Stdin,
            table: String::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            reader: ReaderOptions::default(),
            overrides: None,
            emit_metrics: None,
            dry_run: false,
            cancel: None,
        }
    }
}

/// What an import did, or would do on a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub result: ImportResult,
    /// The table-creation statement that was (or would be) executed
    pub ddl: String,
    pub dry_run: bool,
}

/// Infer a schema for `raw`, create `table_name` in `sink` and load every row.
pub async fn import<S: TableSink + ?Sized>(
    raw: &RawTable,
    table_name: &str,
    sink: &S,
    loader: &BatchLoader<'_>,
) -> Result<ImportResult, ImportError> {
    let plan = plan_import(raw, table_name, None, sink.dialect())?;
    run_import(raw, plan, sink, loader).await
}

/// Create the planned table, then load `raw` into it.
///
/// No rows are sent if the table-creation statement fails. The loader's
/// cancellation token also covers the table-creation statement.
pub async fn run_import<S: TableSink + ?Sized>(
    raw: &RawTable,
    plan: ImportPlan,
    sink: &S,
    loader: &BatchLoader<'_>,
) -> Result<ImportResult, ImportError> {
    let cancelled = ImportError::Cancelled {
        inserted: 0,
        total: raw.row_count() as u64,
    };

    if loader.is_cancelled() {
        warn!("Import cancelled before creating {}", plan.schema.table);
        return Err(cancelled);
    }

    match loader.cancellation() {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Import cancelled while creating {}", plan.schema.table);
                return Err(cancelled);
            }
            created = create_table(sink, &plan) => created?,
        },
        None => create_table(sink, &plan).await?,
    }

    loader.load(raw, plan.schema, sink).await
}

/// Read delimited input per `config` and import it into `sink`.
pub async fn import_delimited<S: TableSink + ?Sized>(
    sink: &S,
    config: &Config,
) -> Result<ImportReport, ImportError> {
    if config.chunk_size == 0 {
        return Err(ImportError::InvalidChunkSize);
    }

    let raw = match &config.cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Import cancelled while reading input");
                return Err(ImportError::Cancelled { inserted: 0, total: 0 });
            }
            raw = read_input(config) => raw?,
        },
        None => read_input(config).await?,
    };
    let plan = plan_import(
        &raw,
        &config.table,
        config.overrides.as_ref(),
        sink.dialect(),
    )?;

    if config.dry_run {
        info!("Dry run: would execute {}", plan.ddl);
        info!(
            "Dry run: would insert {} rows in chunks of {}",
            raw.row_count(),
            config.chunk_size
        );
        return Ok(ImportReport {
            result: ImportResult {
                inserted: 0,
                total: raw.row_count() as u64,
                schema: plan.schema,
            },
            ddl: plan.ddl,
            dry_run: true,
        });
    }

    let collector = config.emit_metrics.clone().map(MetricsCollector::new);
    let emission = collector
        .as_ref()
        .map(|c| c.start_emission_task(METRICS_INTERVAL));

    let mut loader = BatchLoader::new(config.chunk_size);
    if let Some(collector) = &collector {
        loader = loader.with_observer(collector);
    }
    if let Some(token) = &config.cancel {
        loader = loader.with_cancellation(token.clone());
    }

    let ddl = plan.ddl.clone();
    let outcome = run_import(&raw, plan, sink, &loader).await;

    if let Some(handle) = emission {
        handle.abort();
    }
    if let Some(collector) = &collector {
        if let Err(e) = collector.flush_final().await {
            warn!("Failed to write final metrics: {}", e);
        }
    }

    Ok(ImportReport {
        result: outcome?,
        ddl,
        dry_run: false,
    })
}

async fn read_input(config: &Config) -> Result<RawTable, ImportError> {
    let bytes = match &config.input {
        CsvInput::Path(path) => {
            info!("Reading {}", path.display());
            tokio::fs::read(path).await?
        }
        CsvInput::Stdin => {
            info!("Reading standard input");
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            buf
        }
    };
    read_raw_table(bytes.as_slice(), &config.reader)
}
