//! Error types for import and export.

use bridge_core::{IdentifierError, RaggedRow};
use csv_types::CastError;
use table_sink::SinkError;

/// Why a chunk could not be inserted.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    /// The sink rejected the insert call.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A cell in the chunk does not cast to its column's type.
    #[error("row {row}, column '{column}': {source}")]
    Cast {
        /// 1-based data row number
        row: usize,
        column: String,
        #[source]
        source: CastError,
    },
}

/// Errors that can occur while importing delimited text.
///
/// Every variant is terminal for the current import. Nothing is retried and
/// chunks that were already inserted are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A table or column name is not a valid identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Two columns share a name.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// The input has no rows or no columns.
    #[error("Input contains no rows or no columns")]
    EmptyInput,

    /// A row's cell count differs from the header's.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The delimited input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while reading the input or a schema override file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema override file could not be parsed.
    #[error("Failed to parse schema overrides: {0}")]
    Overrides(#[from] serde_yaml::Error),

    /// A schema override names a column the input does not have.
    #[error("Schema override for unknown column '{0}'")]
    UnknownOverrideColumn(String),

    /// Column names were supplied but do not match the column count.
    #[error("Expected {expected} column names, got {found}")]
    ColumnNameCount { expected: usize, found: usize },

    /// The chunk size is zero.
    #[error("Chunk size must be positive")]
    InvalidChunkSize,

    /// The sink rejected the table-creation statement. No rows were inserted.
    #[error("Failed to create table: {0}")]
    SchemaCreationFailed(#[source] SinkError),

    /// A chunk failed. Earlier chunks stay inserted; later chunks were not attempted.
    #[error(
        "Import failed at chunk {chunk_index} after inserting {inserted} of {total} rows: {source}"
    )]
    ImportFailed {
        /// 0-based index of the failed chunk
        chunk_index: usize,
        inserted: u64,
        total: u64,
        #[source]
        source: LoadFailure,
    },

    /// The import was cancelled between or during chunk submissions.
    #[error("Import cancelled after inserting {inserted} of {total} rows")]
    Cancelled { inserted: u64, total: u64 },
}

impl ImportError {
    /// Rows already inserted when the import stopped, for errors raised by the loader.
    pub fn inserted(&self) -> Option<u64> {
        match self {
            Self::ImportFailed { inserted, .. } | Self::Cancelled { inserted, .. } => {
                Some(*inserted)
            }
            _ => None,
        }
    }
}

impl From<IdentifierError> for ImportError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e.0)
    }
}

impl From<RaggedRow> for ImportError {
    fn from(e: RaggedRow) -> Self {
        Self::RaggedRow {
            row: e.row,
            expected: e.expected,
            found: e.found,
        }
    }
}

/// Errors that can occur while exporting query results.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Query failed: {0}")]
    Sink(#[from] SinkError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IdentifierError> for ExportError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e.0)
    }
}
