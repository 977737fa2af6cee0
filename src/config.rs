//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Nothing here is persisted.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::delivery::DEFAULT_MAX_DELAY;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Exclusive upper bound of the random per-notification delivery delay.
    pub delivery_max_delay: Duration,

    /// Buffer size of the streaming client broadcast channel.
    pub client_channel_capacity: usize,

    /// Interval between SSE keep-alive comments.
    pub sse_keep_alive: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            delivery_max_delay: DEFAULT_MAX_DELAY,
            client_channel_capacity: 1024,
            sse_keep_alive: Duration::from_secs(15),
            log_format: LogFormat::Text,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("LISTEN_ADDR is not a socket address: {raw}"))?,
            Err(_) => defaults.listen_addr,
        };

        let delivery_max_delay = Duration::from_millis(parse_env(
            "DELIVERY_MAX_DELAY_MS",
            u64::try_from(defaults.delivery_max_delay.as_millis()).unwrap_or(120),
        ));
        let client_channel_capacity =
            parse_env("CLIENT_CHANNEL_CAPACITY", defaults.client_channel_capacity).max(1);
        let sse_keep_alive = Duration::from_secs(
            parse_env("SSE_KEEP_ALIVE_SECS", defaults.sse_keep_alive.as_secs()).max(1),
        );
        let log_format = parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref());

        Ok(Self {
            listen_addr,
            delivery_max_delay,
            client_channel_capacity,
            sse_keep_alive,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Accepts `"json"` (case-insensitive); anything else is text.
fn parse_log_format(value: Option<&str>) -> LogFormat {
    match value {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.delivery_max_delay, Duration::from_millis(120));
        assert_eq!(config.client_channel_capacity, 1024);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("HERALD_TEST_SURELY_UNSET_KEY", 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(parse_log_format(Some("json")), LogFormat::Json);
        assert_eq!(parse_log_format(Some("JSON")), LogFormat::Json);
        assert_eq!(parse_log_format(Some("pretty")), LogFormat::Text);
        assert_eq!(parse_log_format(None), LogFormat::Text);
    }
}
