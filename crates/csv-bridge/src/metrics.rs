//! Progress metrics for imports, emitted as JSON lines

use crate::loader::{LoadProgress, ProgressObserver};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;

/// Metrics collector fed by the batch loader
#[derive(Clone)]
pub struct MetricsCollector {
    rows_inserted: Arc<AtomicU64>,
    total_rows: Arc<AtomicU64>,
    chunks_completed: Arc<AtomicU64>,
    start_time: Instant,
    output_path: PathBuf,
}

/// Single metrics entry (one JSON line)
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsEntry {
    pub timestamp: String,
    pub rows_inserted: u64,
    pub total_rows: u64,
    pub chunks_completed: u64,
    pub throughput_rows_per_sec: f64,
    pub elapsed_secs: f64,
}

impl MetricsCollector {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            rows_inserted: Arc::new(AtomicU64::new(0)),
            total_rows: Arc::new(AtomicU64::new(0)),
            chunks_completed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
            output_path,
        }
    }

    /// Record one completed chunk
    pub fn record(&self, progress: &LoadProgress) {
        self.rows_inserted.store(progress.inserted, Ordering::Relaxed);
        self.total_rows.store(progress.total, Ordering::Relaxed);
        self.chunks_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Current metrics snapshot
    pub fn snapshot(&self) -> MetricsEntry {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let rows = self.rows_inserted.load(Ordering::Relaxed);

        let throughput_rows = if elapsed > 0.0 {
            rows as f64 / elapsed
        } else {
            0.0
        };

        MetricsEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            rows_inserted: rows,
            total_rows: self.total_rows.load(Ordering::Relaxed),
            chunks_completed: self.chunks_completed.load(Ordering::Relaxed),
            throughput_rows_per_sec: throughput_rows,
            elapsed_secs: elapsed,
        }
    }

    /// Append a snapshot to the output file every `interval` until aborted
    pub fn start_emission_task(
        &self,
        interval: Duration,
    ) -> tokio::task::JoinHandle<std::io::Result<()>> {
        let collector = self.clone();

        tokio::spawn(async move {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&collector.output_path)
                .await?;

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                collector.write_line(&mut file).await?;
            }
        })
    }

    /// Append one final snapshot, so short imports still leave a record
    pub async fn flush_final(&self) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .await?;
        self.write_line(&mut file).await
    }

    async fn write_line(&self, file: &mut tokio::fs::File) -> std::io::Result<()> {
        let json_line = serde_json::to_string(&self.snapshot()).map_err(std::io::Error::from)?;
        file.write_all(json_line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await
    }
}

impl ProgressObserver for MetricsCollector {
    fn on_chunk(&self, progress: &LoadProgress) {
        self.record(progress);
    }
}
