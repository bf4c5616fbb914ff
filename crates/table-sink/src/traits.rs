//! TableSink trait definition.

use crate::error::SinkError;
use bridge_core::{Identifier, Row, ToDdl};

/// A column in a query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryColumn {
    pub name: String,
    /// Database-native type name, e.g. `Nullable(Int64)`
    pub type_name: String,
}

/// Rows returned by [`TableSink::query`], with their column metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<QueryColumn>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Trait for the database that receives DDL and rows and answers queries.
///
/// # Usage Pattern
///
/// Pipeline code uses generics for zero-cost dispatch:
///
/// ```ignore
/// pub async fn load<S: TableSink + ?Sized>(sink: &S, ...) -> Result<ImportResult, ImportError> {
///     sink.insert_rows(&schema.table, &columns, &chunk).await?;
/// }
/// ```
///
/// A handle may be shared across requests, but calls on one underlying
/// connection must not overlap. Implementations either serialize internally or
/// document that callers must.
#[async_trait::async_trait]
pub trait TableSink: Send + Sync {
    /// DDL dialect used to render table-creation statements for this sink.
    fn dialect(&self) -> &dyn ToDdl;

    /// Execute a statement that returns no rows (DDL).
    async fn execute_statement(&self, statement: &str) -> Result<(), SinkError>;

    /// Insert a batch of typed rows. Each row is ordered like `columns`.
    async fn insert_rows(
        &self,
        table: &Identifier,
        columns: &[Identifier],
        rows: &[Row],
    ) -> Result<(), SinkError>;

    /// Run a query and return its rows.
    async fn query(&self, sql: &str) -> Result<QueryResult, SinkError>;
}
