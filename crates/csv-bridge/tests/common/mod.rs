//! In-memory sink shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_core::{AnsiDdl, Identifier, RawTable, Row, ToDdl};
use std::sync::Mutex;
use table_sink::{QueryResult, SinkError, TableSink};

/// One `insert_rows` call as the sink saw it.
#[derive(Debug, Clone)]
pub struct InsertCall {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Records every statement and insert. Can be told to fail.
#[derive(Default)]
pub struct RecordingSink {
    pub statements: Mutex<Vec<String>>,
    pub inserts: Mutex<Vec<InsertCall>>,
    /// 0-based insert call that fails
    pub fail_on_insert: Option<usize>,
    pub fail_statements: bool,
    /// 0-based insert call that never completes
    pub hang_on_insert: Option<usize>,
    pub hang_statements: bool,
    pub query_result: QueryResult,
    pub queries: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert(call: usize) -> Self {
        Self {
            fail_on_insert: Some(call),
            ..Self::default()
        }
    }

    pub fn failing_statements() -> Self {
        Self {
            fail_statements: true,
            ..Self::default()
        }
    }

    pub fn hanging_insert(call: usize) -> Self {
        Self {
            hang_on_insert: Some(call),
            ..Self::default()
        }
    }

    pub fn hanging_statements() -> Self {
        Self {
            hang_statements: true,
            ..Self::default()
        }
    }

    pub fn with_query_result(result: QueryResult) -> Self {
        Self {
            query_result: result,
            ..Self::default()
        }
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn inserts(&self) -> Vec<InsertCall> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn inserted_rows(&self) -> Vec<Row> {
        self.inserts().into_iter().flat_map(|c| c.rows).collect()
    }
}

#[async_trait]
impl TableSink for RecordingSink {
    fn dialect(&self) -> &dyn ToDdl {
        &AnsiDdl
    }

    async fn execute_statement(&self, statement: &str) -> Result<(), SinkError> {
        if self.hang_statements {
            std::future::pending::<()>().await;
        }
        if self.fail_statements {
            return Err(SinkError::Rejected {
                status: 500,
                message: "syntax error".to_string(),
            });
        }
        self.statements.lock().unwrap().push(statement.to_string());
        Ok(())
    }

    async fn insert_rows(
        &self,
        table: &Identifier,
        columns: &[Identifier],
        rows: &[Row],
    ) -> Result<(), SinkError> {
        let hang = self.hang_on_insert == Some(self.inserts.lock().unwrap().len());
        if hang {
            std::future::pending::<()>().await;
        }

        let mut inserts = self.inserts.lock().unwrap();
        if self.fail_on_insert == Some(inserts.len()) {
            return Err(SinkError::Connection("connection reset".to_string()));
        }
        inserts.push(InsertCall {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows.to_vec(),
        });
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<QueryResult, SinkError> {
        self.queries.lock().unwrap().push(sql.to_string());
        Ok(self.query_result.clone())
    }
}

pub fn raw_table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

/// `n` rows of `id,label` with ids 1..=n
pub fn numbered_table(n: usize) -> RawTable {
    RawTable::new(
        vec!["id".to_string(), "label".to_string()],
        (1..=n)
            .map(|i| vec![i.to_string(), format!("row {i}")])
            .collect(),
    )
    .unwrap()
}
