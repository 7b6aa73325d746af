//! Environment-driven configuration.
//!
//! Every setting has a default; a variable that is set but malformed is an
//! error rather than being silently replaced by the default.

use std::time::Duration;

use jobfinder_core::{EndpointError, SearchRequestBuilder};
use jobfinder_engine::DispatchSettings;
use jobfinder_logging::{LevelFilter, LogDestination};
use url::Url;

pub const ENV_API_BASE: &str = "JOBFINDER_API_BASE";
pub const ENV_RESUME_DEADLINE: &str = "JOBFINDER_RESUME_DEADLINE_SECS";
pub const ENV_MANUAL_DEADLINE: &str = "JOBFINDER_MANUAL_DEADLINE_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "JOBFINDER_CONNECT_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "JOBFINDER_LOG";
pub const ENV_LOG_TARGET: &str = "JOBFINDER_LOG_TARGET";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: {source}")]
    Endpoint {
        key: &'static str,
        #[source]
        source: EndpointError,
    },
    #[error("{key} must be a positive whole number of seconds (got {value:?})")]
    Seconds { key: &'static str, value: String },
    #[error("{key} must be one of off, error, warn, info, debug, trace (got {value:?})")]
    LogLevel { key: &'static str, value: String },
    #[error("{key} must be terminal, file or both (got {value:?})")]
    LogTarget { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: Url,
    pub requests: SearchRequestBuilder,
    pub dispatch: DispatchSettings,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base = lookup(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let endpoint_error = |source: EndpointError| ConfigError::Endpoint {
            key: ENV_API_BASE,
            source,
        };
        let api_base = Url::parse(raw_base.trim())
            .map_err(|err| endpoint_error(EndpointError::from(err)))?;
        let requests = SearchRequestBuilder::from_url(api_base.clone()).map_err(endpoint_error)?;

        let defaults = DispatchSettings::default();
        let dispatch = DispatchSettings {
            connect_timeout: seconds(&lookup, ENV_CONNECT_TIMEOUT, defaults.connect_timeout)?,
            resume_deadline: seconds(&lookup, ENV_RESUME_DEADLINE, defaults.resume_deadline)?,
            manual_deadline: seconds(&lookup, ENV_MANUAL_DEADLINE, defaults.manual_deadline)?,
            ..defaults
        };

        let log_level = match lookup(ENV_LOG_LEVEL) {
            None => LevelFilter::Info,
            Some(value) => jobfinder_logging::parse_level(&value).ok_or(ConfigError::LogLevel {
                key: ENV_LOG_LEVEL,
                value,
            })?,
        };

        let log_destination = match lookup(ENV_LOG_TARGET) {
            None => LogDestination::Terminal,
            Some(value) => parse_destination(&value).ok_or(ConfigError::LogTarget {
                key: ENV_LOG_TARGET,
                value,
            })?,
        };

        Ok(Self {
            api_base,
            requests,
            dispatch,
            log_level,
            log_destination,
        })
    }
}

fn seconds<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Seconds { key, value }),
    }
}

fn parse_destination(value: &str) -> Option<LogDestination> {
    match value.trim().to_ascii_lowercase().as_str() {
        "terminal" => Some(LogDestination::Terminal),
        "file" => Some(LogDestination::File),
        "both" => Some(LogDestination::Both),
        _ => None,
    }
}
