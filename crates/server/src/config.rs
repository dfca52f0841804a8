//! Server settings read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

pub const ADDR_ENV: &str = "PRECIS_ADDR";
pub const TIMEOUT_ENV: &str = "PRECIS_REQUEST_TIMEOUT_SECS";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Whole-request timeout, including the upstream summarization call.
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let addr = get(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .trim()
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", ADDR_ENV, addr))?;

        let timeout = match get(TIMEOUT_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("{} is not a number of seconds: {}", TIMEOUT_ENV, value))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self { addr, request_timeout: Duration::from_secs(timeout) })
    }
}
