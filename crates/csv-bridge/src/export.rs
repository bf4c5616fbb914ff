//! Query results → delimited text.

use crate::error::ExportError;
use bridge_core::Identifier;
use csv_types::cell_to_text;
use std::io::Write;
use table_sink::TableSink;
use tracing::info;

/// How to write delimited output.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub delimiter: u8,
    /// Write the column names as the first record
    pub has_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Run `sql` through `sink` and write the result to `writer`.
///
/// Returns the number of data rows written. Nulls are written as empty cells.
pub async fn export_query<S, W>(
    sink: &S,
    sql: &str,
    writer: W,
    options: &ExportOptions,
) -> Result<u64, ExportError>
where
    S: TableSink + ?Sized,
    W: Write,
{
    let result = sink.query(sql).await?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    if options.has_headers && !result.columns.is_empty() {
        csv_writer.write_record(result.column_names())?;
    }

    for row in &result.rows {
        csv_writer.write_record(row.iter().map(cell_to_text))?;
    }
    csv_writer.flush()?;

    let count = result.rows.len() as u64;
    info!("Exported {} rows", count);
    Ok(count)
}

/// Write every row of `table` to `writer`.
pub async fn export_table<S, W>(
    sink: &S,
    table: &str,
    writer: W,
    options: &ExportOptions,
) -> Result<u64, ExportError>
where
    S: TableSink + ?Sized,
    W: Write,
{
    let table = Identifier::parse(table)?;
    let sql = format!("SELECT * FROM {}", sink.dialect().quote(table.as_str()));
    export_query(sink, &sql, writer, options).await
}
