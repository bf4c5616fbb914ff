//! Raw tables, table schemas and import results.

use crate::identifier::Identifier;
use crate::types::StorageType;
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw (untyped) tables
// ============================================================================

/// A row whose cell count differs from the number of columns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Row {row} has {found} cells, expected {expected}")]
pub struct RaggedRow {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// Column names plus rows of raw, untyped cell text.
///
/// Every row has exactly as many cells as there are columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a raw table, rejecting ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, RaggedRow> {
        let expected = columns.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(RaggedRow {
                row: index + 1,
                expected,
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }
}

// ============================================================================
// Schemas
// ============================================================================

/// One column of a target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: Identifier,

    #[serde(rename = "type")]
    pub storage_type: StorageType,
}

impl ColumnSchema {
    pub fn new(name: Identifier, storage_type: StorageType) -> Self {
        Self { name, storage_type }
    }
}

/// The ordered columns of a target table.
///
/// Column order matches the source column order; names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: Identifier,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(table: Identifier, columns: Vec<ColumnSchema>) -> Self {
        Self { table, columns }
    }

    pub fn column_names(&self) -> Vec<Identifier> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of a completed import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    /// Rows written to the sink
    pub inserted: u64,
    /// Rows in the source
    pub total: u64,
    pub schema: TableSchema,
}

impl ImportResult {
    pub fn table(&self) -> &Identifier {
        &self.schema.table
    }

    /// The caller-facing summary.
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            inserted: self.inserted,
            total: self.total,
            table: self.schema.table.to_string(),
            columns: self.schema.columns.clone(),
        }
    }
}

/// `{inserted, total, table, columns: [{name, type}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: u64,
    pub total: u64,
    pub table: String,
    pub columns: Vec<ColumnSchema>,
}
