//! Runtime configuration read from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HEARTBEAT_SECS: u64 = 30;
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Interval between SSE heartbeat events.
    pub sse_heartbeat: Duration,
    /// Events buffered per game channel before slow subscribers lag.
    pub sse_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            sse_heartbeat: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            sse_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };
        let heartbeat_secs = positive(
            get("SSE_HEARTBEAT_SECS"),
            "SSE_HEARTBEAT_SECS",
            DEFAULT_HEARTBEAT_SECS,
        )?;
        let capacity = positive(
            get("SSE_CHANNEL_CAPACITY"),
            "SSE_CHANNEL_CAPACITY",
            DEFAULT_CHANNEL_CAPACITY as u64,
        )?;

        Ok(Self {
            host,
            port,
            sse_heartbeat: Duration::from_secs(heartbeat_secs),
            sse_channel_capacity: capacity as usize,
        })
    }
}

fn positive(raw: Option<String>, key: &str, default: u64) -> Result<u64, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::config(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}
