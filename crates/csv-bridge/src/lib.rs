//! Delimited-file import and export for table sinks.
//!
//! Import pipeline:
//!
//! ```text
//! delimited text ──reader──▶ RawTable ──schema──▶ TableSchema + DDL ──loader──▶ TableSink
//! ```
//!
//! The whole input is buffered before types are inferred. Chunks are inserted
//! strictly in order and the first failed chunk stops the import.
//!
//! Export runs a query through the sink and writes the rows as delimited text.

mod error;
mod export;
mod import;
mod loader;
mod metrics;
mod overrides;
mod reader;
mod schema;

pub use error::{ExportError, ImportError, LoadFailure};
pub use export::{export_query, export_table, ExportOptions};
pub use import::{import, import_delimited, run_import, Config, CsvInput, ImportReport};
pub use loader::{load, BatchLoader, LoadProgress, ProgressObserver, DEFAULT_CHUNK_SIZE};
pub use metrics::{MetricsCollector, MetricsEntry};
pub use overrides::TypeOverrides;
pub use reader::{read_raw_table, ReaderOptions};
pub use schema::{build_schema, build_schema_with_overrides, create_table, plan_import, ImportPlan};
