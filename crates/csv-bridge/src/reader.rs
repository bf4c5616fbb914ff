//! Delimited text → RawTable.

use crate::error::ImportError;
use bridge_core::RawTable;
use std::io::Read;
use tracing::debug;

/// How to read delimited input.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,

    /// Whether the first record is a header row (default: true)
    pub has_headers: bool,

    /// Column names to use when `has_headers` is false.
    /// If provided, must match the number of columns in the input.
    pub column_names: Option<Vec<String>>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            column_names: None,
        }
    }
}

/// Read all of `reader` into a `RawTable`.
///
/// Cells are kept verbatim, including surrounding whitespace. Without a header
/// row, columns come from `column_names` or are named `column_0..N`.
pub fn read_raw_table<R: Read>(reader: R, options: &ReaderOptions) -> Result<RawTable, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        // Ragged rows are reported by RawTable with a row number
        .flexible(true)
        .from_reader(reader);

    let headers = if options.has_headers {
        Some(
            csv_reader
                .headers()?
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<String>>(),
        )
    } else {
        None
    };

    let rows = csv_reader
        .records()
        .map(|record| record.map(|r| r.iter().map(|v| v.to_string()).collect::<Vec<String>>()))
        .collect::<Result<Vec<_>, _>>()?;

    let columns = match headers {
        Some(headers) => headers,
        None => {
            let column_count = rows.first().map(Vec::len).unwrap_or(0);
            match &options.column_names {
                Some(names) if names.len() != column_count && !rows.is_empty() => {
                    return Err(ImportError::ColumnNameCount {
                        expected: column_count,
                        found: names.len(),
                    });
                }
                Some(names) => names.clone(),
                None => (0..column_count).map(|i| format!("column_{i}")).collect(),
            }
        }
    };

    debug!("Read {} rows with columns {:?}", rows.len(), columns);

    Ok(RawTable::new(columns, rows)?)
}
