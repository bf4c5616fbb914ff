//! ClickHouse sink for clickhouse-bridge.
//!
//! Talks to ClickHouse over its HTTP interface: statements and queries are
//! POSTed to `/`, credentials travel in `X-ClickHouse-*` headers, query results
//! are read as `JSONCompact` and inserts are sent as `JSONEachRow`.

mod connect;
mod ddl;
mod json;
mod sink_impl;

pub use connect::{clickhouse_connect, clickhouse_connect_with_retries, ClickHouseOpts};
pub use ddl::ClickHouseDdl;
pub use json::{cell_to_json, json_to_cell};
pub use sink_impl::ClickHouseSink;
