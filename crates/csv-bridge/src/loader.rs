//! Batch loader: casts rows chunk by chunk and inserts them in order.
//!
//! Chunk N+1 is never submitted before chunk N's insert returns. The first
//! failing chunk stops the load; it is not retried and later chunks are not
//! attempted, so `inserted + unattempted == total` on every exit path.

use crate::error::{ImportError, LoadFailure};
use bridge_core::{ImportResult, RawTable, Row, TableSchema};
use csv_types::cast_cell;
use table_sink::TableSink;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Rows per insert call when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Progress after a chunk completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    /// 0-based index of the chunk that just completed
    pub chunk_index: usize,
    pub chunk_count: usize,
    pub inserted: u64,
    pub total: u64,
}

/// Receives progress after every successful chunk. Advisory only.
pub trait ProgressObserver: Send + Sync {
    fn on_chunk(&self, progress: &LoadProgress);
}

/// Chunked, sequential, fail-fast loader.
#[derive(Default)]
pub struct BatchLoader<'a> {
    chunk_size: Option<usize>,
    observer: Option<&'a dyn ProgressObserver>,
    cancel: Option<CancellationToken>,
}

impl<'a> BatchLoader<'a> {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: Some(chunk_size),
            observer: None,
            cancel: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Stop before the next chunk (or abandon the one in flight) once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Insert every row of `raw` into `schema.table`, casting cells per `schema`.
    pub async fn load<S: TableSink + ?Sized>(
        &self,
        raw: &RawTable,
        schema: TableSchema,
        sink: &S,
    ) -> Result<ImportResult, ImportError> {
        let chunk_size = self.chunk_size();
        if chunk_size == 0 {
            return Err(ImportError::InvalidChunkSize);
        }

        let total = raw.row_count() as u64;
        let chunk_count = raw.row_count().div_ceil(chunk_size);
        let columns = schema.column_names();
        let mut inserted: u64 = 0;

        info!(
            "Loading {} rows into {} in {} chunks of up to {} rows",
            total, schema.table, chunk_count, chunk_size
        );

        for (chunk_index, chunk) in raw.rows().chunks(chunk_size).enumerate() {
            if self.is_cancelled() {
                warn!("Import cancelled before chunk {}", chunk_index);
                return Err(ImportError::Cancelled { inserted, total });
            }

            let first_row = chunk_index * chunk_size;
            let rows = cast_chunk(chunk, first_row, &schema).map_err(|source| {
                ImportError::ImportFailed {
                    chunk_index,
                    inserted,
                    total,
                    source,
                }
            })?;

            let outcome = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        warn!("Import cancelled during chunk {}", chunk_index);
                        return Err(ImportError::Cancelled { inserted, total });
                    }
                    result = sink.insert_rows(&schema.table, &columns, &rows) => result,
                },
                None => sink.insert_rows(&schema.table, &columns, &rows).await,
            };

            if let Err(e) = outcome {
                warn!(
                    "Chunk {} of {} failed after {} rows inserted: {}",
                    chunk_index + 1,
                    chunk_count,
                    inserted,
                    e
                );
                return Err(ImportError::ImportFailed {
                    chunk_index,
                    inserted,
                    total,
                    source: LoadFailure::Sink(e),
                });
            }

            inserted += rows.len() as u64;
            debug!(
                "Chunk {}/{} inserted ({}/{} rows)",
                chunk_index + 1,
                chunk_count,
                inserted,
                total
            );

            if let Some(observer) = self.observer {
                observer.on_chunk(&LoadProgress {
                    chunk_index,
                    chunk_count,
                    inserted,
                    total,
                });
            }
        }

        info!("Inserted {} of {} rows into {}", inserted, total, schema.table);

        Ok(ImportResult {
            inserted,
            total,
            schema,
        })
    }

    pub(crate) fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(CancellationToken::is_cancelled)
            .unwrap_or(false)
    }
}

/// Load with default settings and the given chunk size.
pub async fn load<S: TableSink + ?Sized>(
    raw: &RawTable,
    schema: TableSchema,
    sink: &S,
    chunk_size: usize,
) -> Result<ImportResult, ImportError> {
    BatchLoader::new(chunk_size).load(raw, schema, sink).await
}

fn cast_chunk(
    chunk: &[Vec<String>],
    first_row: usize,
    schema: &TableSchema,
) -> Result<Vec<Row>, LoadFailure> {
    chunk
        .iter()
        .enumerate()
        .map(|(offset, cells)| {
            cells
                .iter()
                .zip(&schema.columns)
                .map(|(cell, column)| {
                    cast_cell(cell, column.storage_type).map_err(|source| LoadFailure::Cast {
                        row: first_row + offset + 1,
                        column: column.name.to_string(),
                        source,
                    })
                })
                .collect()
        })
        .collect()
}
