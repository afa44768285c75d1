//! Client configuration.
//!
//! Settings normally come from the builders. [`ClientConfig::from_env`] reads
//! them from the environment instead:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `COINBASE_EXCHANGE_BASE_URL` | API root, overrides the sandbox flag |
//! | `COINBASE_EXCHANGE_SANDBOX` | `1`/`true` to target the sandbox |
//! | `COINBASE_EXCHANGE_MAX_RETRIES` | retries for transient failures |
//! | `COINBASE_EXCHANGE_TIMEOUT_SECS` | per-request timeout |
//! | `COINBASE_EXCHANGE_BATCH_CONCURRENCY` | requests in flight for batch calls |

use std::str::FromStr;
use std::time::Duration;

use crate::error::CoinbaseError;
use crate::rest::{PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

/// Default number of retries for transient transport failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default number of per-product requests in flight during batch calls.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Settings shared by the transport and the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// User agent; defaults to the crate name and version.
    pub user_agent: Option<String>,
    /// Retries for transient transport failures.
    pub max_retries: u32,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Requests in flight for batch operations.
    pub batch_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_BASE_URL.to_string(),
            user_agent: None,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: None,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl ClientConfig {
    /// Defaults pointed at the public sandbox.
    pub fn sandbox() -> Self {
        Self {
            base_url: SANDBOX_BASE_URL.to_string(),
            ..Self::default()
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, CoinbaseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoinbaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sandbox = lookup("COINBASE_EXCHANGE_SANDBOX")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let mut config = if sandbox {
            Self::sandbox()
        } else {
            Self::default()
        };

        if let Some(url) = lookup("COINBASE_EXCHANGE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(retries) = parse_var(&lookup, "COINBASE_EXCHANGE_MAX_RETRIES")? {
            config.max_retries = retries;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "COINBASE_EXCHANGE_TIMEOUT_SECS")? {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(concurrency) = parse_var(&lookup, "COINBASE_EXCHANGE_BATCH_CONCURRENCY")? {
            config.batch_concurrency = concurrency;
        }

        config.validated_base_url()?;
        Ok(config)
    }

    /// The base URL, checked for syntax and stripped of a trailing slash.
    pub fn validated_base_url(&self) -> Result<String, CoinbaseError> {
        url::Url::parse(&self.base_url)?;
        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, CoinbaseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| CoinbaseError::invalid_argument(format!("{}: {}", key, e)))
        })
        .transpose()
}
