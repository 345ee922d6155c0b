use common::constants::{POLL_INTERVAL, POLL_INTERVAL_ENV, STORE_ADDR_ENV, TIMEOUT_SECONDS};
use common::utils::default_store_addr;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing <order_id> argument")]
    MissingOrderId,
    #[error("invalid store address `{0}`")]
    InvalidAddress(String),
    #[error("invalid TRACKER_POLL_MS `{0}`, expected a positive number of milliseconds")]
    InvalidPollInterval(String),
}

/// Runtime settings of the `client` binary.
///
/// The store address comes from the second argument, then `STORE_ADDR`, then
/// the default port. `TRACKER_POLL_MS` overrides the poll interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub order_id: String,
    pub store_addr: SocketAddr,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl TrackerConfig {
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        Self::resolve(
            args.get(1).map(String::as_str),
            args.get(2).map(String::as_str),
            env::var(STORE_ADDR_ENV).ok(),
            env::var(POLL_INTERVAL_ENV).ok(),
        )
    }

    fn resolve(
        order_id: Option<&str>,
        addr_arg: Option<&str>,
        addr_env: Option<String>,
        poll_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let order_id = order_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingOrderId)?
            .to_string();

        let store_addr = match addr_arg.map(str::to_string).or(addr_env) {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddress(raw.clone()))?,
            None => default_store_addr(),
        };

        let poll_interval = match poll_env {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => return Err(ConfigError::InvalidPollInterval(raw)),
            },
            None => POLL_INTERVAL,
        };

        Ok(Self {
            order_id,
            store_addr,
            poll_interval,
            request_timeout: Duration::from_secs(TIMEOUT_SECONDS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = TrackerConfig::resolve(Some("abc123"), None, None, None).unwrap();
        assert_eq!(config.order_id, "abc123");
        assert_eq!(config.store_addr, default_store_addr());
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn argument_beats_environment() {
        let config = TrackerConfig::resolve(
            Some("abc123"),
            Some("127.0.0.1:9000"),
            Some("127.0.0.1:9100".to_string()),
            Some("250".to_string()),
        )
        .unwrap();
        assert_eq!(config.store_addr.port(), 9000);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            TrackerConfig::resolve(None, None, None, None),
            Err(ConfigError::MissingOrderId)
        );
        assert_eq!(
            TrackerConfig::resolve(Some("  "), None, None, None),
            Err(ConfigError::MissingOrderId)
        );
        assert_eq!(
            TrackerConfig::resolve(Some("a"), Some("nowhere"), None, None),
            Err(ConfigError::InvalidAddress("nowhere".to_string()))
        );
        assert_eq!(
            TrackerConfig::resolve(Some("a"), None, None, Some("0".to_string())),
            Err(ConfigError::InvalidPollInterval("0".to_string()))
        );
    }
}
