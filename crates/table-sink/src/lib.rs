//! Table sink trait abstraction.
//!
//! This crate defines the `TableSink` trait that abstracts over the database
//! receiving imported rows and answering export queries. `clickhouse-sink`
//! implements it for ClickHouse; tests implement it with in-memory doubles.
//!
//! The trait speaks bridge-core types (`Identifier`, `Row`, `CellValue`) so
//! pipeline code never depends on a specific driver.

mod error;
mod traits;

pub use error::SinkError;
pub use traits::{QueryColumn, QueryResult, TableSink};
