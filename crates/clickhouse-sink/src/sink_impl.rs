//! Implementation of TableSink for the ClickHouse HTTP interface.

use crate::connect::ClickHouseOpts;
use crate::ddl::ClickHouseDdl;
use crate::json::{cell_to_json, json_to_cell};
use bridge_core::{CellValue, Identifier, Row, ToDdl};
use serde::Deserialize;
use table_sink::{QueryColumn, QueryResult, SinkError, TableSink};
use tokio::sync::Mutex;

const USER_HEADER: &str = "X-ClickHouse-User";
const KEY_HEADER: &str = "X-ClickHouse-Key";
const DATABASE_HEADER: &str = "X-ClickHouse-Database";

/// `JSONCompact` output: column metadata plus positional rows.
#[derive(Debug, Deserialize)]
struct JsonCompactResponse {
    meta: Vec<MetaColumn>,
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct MetaColumn {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

/// ClickHouse connection handle implementing `TableSink`.
///
/// Requests on one handle are serialized, so a shared handle never has two
/// statements in flight at once.
pub struct ClickHouseSink {
    client: reqwest::Client,
    endpoint: String,
    opts: ClickHouseOpts,
    dialect: ClickHouseDdl,
    in_flight: Mutex<()>,
}

impl ClickHouseSink {
    /// Create a handle without contacting the server. See [`crate::clickhouse_connect`].
    pub fn new(opts: ClickHouseOpts) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SinkError::Connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: opts.endpoint(),
            opts,
            dialect: ClickHouseDdl,
            in_flight: Mutex::new(()),
        })
    }

    pub fn opts(&self) -> &ClickHouseOpts {
        &self.opts
    }

    /// Check that the server is reachable and accepts the credentials.
    pub async fn ping(&self) -> Result<(), SinkError> {
        self.query("SELECT 1").await.map(|_| ())
    }

    /// Names of the tables in the current database.
    pub async fn list_tables(&self) -> Result<Vec<String>, SinkError> {
        let result = self.query("SHOW TABLES").await?;
        Ok(result.rows.into_iter().filter_map(first_text).collect())
    }

    /// `(name, type)` of each column of `table`, in table order.
    pub async fn describe_table(&self, table: &Identifier) -> Result<Vec<QueryColumn>, SinkError> {
        let sql = format!("DESCRIBE TABLE {}", self.dialect.quote(table.as_str()));
        let result = self.query(&sql).await?;

        result
            .rows
            .into_iter()
            .map(|row| match (row.first(), row.get(1)) {
                (Some(CellValue::Text(name)), Some(CellValue::Text(type_name))) => Ok(QueryColumn {
                    name: name.clone(),
                    type_name: type_name.clone(),
                }),
                _ => Err(SinkError::Decode(format!(
                    "Unexpected DESCRIBE row for table {table}: {row:?}"
                ))),
            })
            .collect()
    }

    /// POST one request and return the response body.
    async fn post(&self, params: &[(&str, &str)], body: String) -> Result<String, SinkError> {
        let _guard = self.in_flight.lock().await;

        let response = self
            .client
            .post(&self.endpoint)
            .header(USER_HEADER, &self.opts.user)
            .header(KEY_HEADER, &self.opts.password)
            .header(DATABASE_HEADER, &self.opts.database)
            .query(params)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                SinkError::Connection(format!("Request to {} failed: {e}", self.endpoint))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            SinkError::Connection(format!(
                "Failed to read response body from {}: {e}",
                self.endpoint
            ))
        })?;

        if !status.is_success() {
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message: text.trim().to_string(),
            });
        }

        Ok(text)
    }
}

fn first_text(row: Row) -> Option<String> {
    match row.into_iter().next() {
        Some(CellValue::Text(s)) => Some(s),
        _ => None,
    }
}

fn strip_statement(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}

#[async_trait::async_trait]
impl TableSink for ClickHouseSink {
    fn dialect(&self) -> &dyn ToDdl {
        &self.dialect
    }

    async fn execute_statement(&self, statement: &str) -> Result<(), SinkError> {
        tracing::debug!("Executing statement: {}", statement);
        self.post(&[], strip_statement(statement).to_string())
            .await
            .map(|_| ())
    }

    async fn insert_rows(
        &self,
        table: &Identifier,
        columns: &[Identifier],
        rows: &[Row],
    ) -> Result<(), SinkError> {
        if rows.is_empty() {
            return Ok(());
        }

        let column_list: Vec<String> = columns
            .iter()
            .map(|c| self.dialect.quote(c.as_str()))
            .collect();
        let insert = format!(
            "INSERT INTO {} ({}) FORMAT JSONEachRow",
            self.dialect.quote(table.as_str()),
            column_list.join(", ")
        );

        let mut body = String::new();
        for row in rows {
            let object: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.to_string(), cell_to_json(cell)))
                .collect();
            body.push_str(&serde_json::Value::Object(object).to_string());
            body.push('\n');
        }

        tracing::debug!("Inserting {} rows into {}", rows.len(), table);
        self.post(
            &[
                ("query", insert.as_str()),
                ("date_time_input_format", "best_effort"),
            ],
            body,
        )
        .await
        .map(|_| ())
    }

    async fn query(&self, sql: &str) -> Result<QueryResult, SinkError> {
        // The format travels as a setting so a trailing `--` comment in `sql` cannot swallow it
        let text = self
            .post(
                &[
                    ("default_format", "JSONCompact"),
                    ("output_format_json_quote_64bit_integers", "0"),
                ],
                strip_statement(sql).to_string(),
            )
            .await?;

        let response: JsonCompactResponse = serde_json::from_str(&text)
            .map_err(|e| SinkError::Decode(format!("Invalid JSONCompact response: {e}")))?;

        let rows: Vec<Row> = response
            .data
            .iter()
            .map(|values| {
                values
                    .iter()
                    .zip(&response.meta)
                    .map(|(value, meta)| json_to_cell(value, &meta.type_name))
                    .collect()
            })
            .collect();

        let columns = response
            .meta
            .into_iter()
            .map(|m| QueryColumn {
                name: m.name,
                type_name: m.type_name,
            })
            .collect();

        Ok(QueryResult { columns, rows })
    }
}
