use crate::sink_impl::ClickHouseSink;
use std::time::Duration;
use table_sink::SinkError;

/// Default HTTPS port of the ClickHouse HTTP interface
pub const DEFAULT_SECURE_PORT: u16 = 8443;
/// Default plain-HTTP port of the ClickHouse HTTP interface
pub const DEFAULT_PORT: u16 = 8123;

/// Default number of connection retry attempts
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Default delay between retry attempts in seconds
const DEFAULT_RETRY_DELAY_SECS: u64 = 1;

/// ClickHouse connection options
#[derive(Clone, Debug)]
pub struct ClickHouseOpts {
    pub host: String,
    /// Falls back to 8443 (secure) or 8123
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    /// Password or JWT token
    pub password: String,
    pub secure: bool,
}

impl Default for ClickHouseOpts {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            database: "default".to_string(),
            user: "default".to_string(),
            password: String::new(),
            secure: true,
        }
    }
}

impl ClickHouseOpts {
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.secure {
            DEFAULT_SECURE_PORT
        } else {
            DEFAULT_PORT
        })
    }

    /// Base URL of the HTTP interface, e.g. `https://host:8443/`.
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.host, self.effective_port())
    }
}

pub async fn clickhouse_connect(opts: &ClickHouseOpts) -> Result<ClickHouseSink, SinkError> {
    clickhouse_connect_with_retries(opts, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS).await
}

/// Connect to ClickHouse with configurable retries.
///
/// Only transport failures are retried. A server that answers with an error
/// (bad credentials, unknown database) fails immediately.
pub async fn clickhouse_connect_with_retries(
    opts: &ClickHouseOpts,
    max_retries: u32,
    retry_delay_secs: u64,
) -> Result<ClickHouseSink, SinkError> {
    let endpoint = opts.endpoint();

    tracing::debug!(
        "Connecting to ClickHouse at {} (database: {}, user: {})",
        endpoint,
        opts.database,
        opts.user
    );

    let sink = ClickHouseSink::new(opts.clone())?;
    let mut attempt = 1;

    loop {
        match sink.ping().await {
            Ok(()) => {
                if attempt > 1 {
                    tracing::info!(
                        "Successfully connected to ClickHouse after {} attempts",
                        attempt
                    );
                }
                return Ok(sink);
            }
            Err(SinkError::Connection(message)) if attempt < max_retries => {
                tracing::warn!(
                    "Failed to connect to ClickHouse at '{}' (attempt {}/{}): {}. Retrying in {}s...",
                    endpoint,
                    attempt,
                    max_retries,
                    message,
                    retry_delay_secs
                );
                tokio::time::sleep(Duration::from_secs(retry_delay_secs)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let secure = ClickHouseOpts::default();
        assert_eq!(secure.effective_port(), 8443);
        assert_eq!(secure.endpoint(), "https://localhost:8443/");

        let plain = ClickHouseOpts {
            secure: false,
            ..Default::default()
        };
        assert_eq!(plain.endpoint(), "http://localhost:8123/");
    }

    #[test]
    fn test_explicit_port_wins() {
        let opts = ClickHouseOpts {
            host: "ch.internal".to_string(),
            port: Some(9440),
            ..Default::default()
        };
        assert_eq!(opts.endpoint(), "https://ch.internal:9440/");
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_with_connection_error() {
        let opts = ClickHouseOpts {
            host: "127.0.0.1".to_string(),
            port: Some(1),
            secure: false,
            ..Default::default()
        };
        let result = clickhouse_connect_with_retries(&opts, 1, 0).await;
        assert!(matches!(result, Err(SinkError::Connection(_))));
    }
}
