//! Relay configuration from environment variables.

use std::env;
use std::time::Duration;

pub const DEFAULT_RELAY_HOST: &str = "127.0.0.1";
pub const DEFAULT_RELAY_PORT: u16 = 7780;
pub const DEFAULT_RELAY_TIMEOUT_MS: u64 = 5000;

/// Where the chain relay listens and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Budget for one request: connect, write and read the answer.
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RELAY_HOST.to_string(),
            port: DEFAULT_RELAY_PORT,
            timeout: Duration::from_millis(DEFAULT_RELAY_TIMEOUT_MS),
        }
    }
}

impl RelayConfig {
    /// Read `G2048_RELAY_HOST`, `G2048_RELAY_PORT` and
    /// `G2048_RELAY_TIMEOUT_MS`; unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RelayConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("G2048_RELAY_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_HOST.to_string());
        let port = lookup("G2048_RELAY_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RELAY_PORT);
        let timeout_ms = lookup("G2048_RELAY_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(DEFAULT_RELAY_TIMEOUT_MS);

        Self {
            host,
            port,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// `host:port`, as accepted by `TcpStream::connect`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if chain submission is disabled via environment
    pub fn is_disabled() -> bool {
        env::var("G2048_CHAIN_DISABLED")
            .map(|v| flag_enabled(&v))
            .unwrap_or(false)
    }
}

fn flag_enabled(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}
