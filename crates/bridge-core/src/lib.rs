//! Core types for the clickhouse-bridge workspace.
//!
//! This crate provides the foundational types shared by every other crate:
//!
//! - [`StorageType`] - The closed set of column types a delimited column can be inferred as
//! - [`CellValue`] - A single typed cell, after casting from raw text
//! - [`RawTable`] - Column names plus untyped rows, as produced by a delimited-text reader
//! - [`TableSchema`] / [`ColumnSchema`] - The inferred, ordered schema of a target table
//! - [`ImportResult`] - The outcome of an import, and its caller-facing [`ImportSummary`]
//! - [`ToDdl`] - Per-database rendering of table-creation statements
//!
//! # Architecture
//!
//! ```text
//! bridge-core (this crate)
//!    │
//!    ├─── csv-types        (inference and text <-> CellValue conversion)
//!    ├─── table-sink       (the TableSink trait, built on Row / Identifier)
//!    ├─── clickhouse-sink  (ClickHouse implementation of TableSink and ToDdl)
//!    └─── csv-bridge       (schema builder, batch loader, export)
//! ```

pub mod ddl;
pub mod identifier;
pub mod table;
pub mod types;

pub use ddl::{AnsiDdl, ToDdl};
pub use identifier::{Identifier, IdentifierError};
pub use table::{ColumnSchema, ImportResult, ImportSummary, RaggedRow, RawTable, TableSchema};
pub use types::{CellValue, Row, StorageType};
