//! ClickHouse Bridge Library
//!
//! Moves tabular data between delimited files and ClickHouse.
//!
//! # Features
//!
//! - Import: infer a column type for every column of a CSV/TSV file, create the
//!   table and insert the rows in ordered, fail-fast chunks
//! - Export: run a query (or dump a table) and write the result as delimited text
//! - Catalog: list tables and describe their columns
//!
//! # CLI Usage
//!
//! ```bash
//! # Import a CSV file into a new table
//! clickhouse-bridge import --file users.csv --table users --host ch.example.com
//!
//! # Preview the inferred schema without touching the server
//! clickhouse-bridge import --file users.csv --table users --dry-run
//!
//! # Export a query as TSV to stdout
//! clickhouse-bridge export --query "SELECT * FROM users" --delimiter '\t'
//! ```

use clap::Parser;
use clickhouse_sink::ClickHouseOpts;

pub mod config;

// Re-export the library crates for convenience
pub use clickhouse_sink as clickhouse;
pub use csv_bridge as csv;

#[derive(Parser, Clone, Debug)]
pub struct ClickHouseArgs {
    /// ClickHouse host name
    #[arg(long, default_value = "localhost", env = "CLICKHOUSE_HOST")]
    pub host: String,

    /// HTTP interface port (default: 8443, or 8123 with --insecure)
    #[arg(long, env = "CLICKHOUSE_PORT")]
    pub port: Option<u16>,

    /// Database to use for unqualified table names
    #[arg(long, default_value = "default", env = "CLICKHOUSE_DATABASE")]
    pub database: String,

    /// ClickHouse user
    #[arg(long, default_value = "default", env = "CLICKHOUSE_USER")]
    pub user: String,

    /// Password or JWT token
    #[arg(
        long,
        alias = "jwt-token",
        default_value = "",
        env = "CLICKHOUSE_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub insecure: bool,
}

impl From<&ClickHouseArgs> for ClickHouseOpts {
    fn from(args: &ClickHouseArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            database: args.database.clone(),
            user: args.user.clone(),
            password: args.password.clone(),
            secure: !args.insecure,
        }
    }
}

/// Parse a single-character delimiter argument. `\t` and `tab` mean a tab.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{s}'"
                )),
            }
        }
    }
}
