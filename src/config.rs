//! Panel configuration parsed from environment variables.

use crate::gateway::{ArgKey, PayloadShape};
use crate::panel::{DEFAULT_PROVIDER, FetchPolicy};

pub const DEFAULT_INVOKE_URL: &str = "http://ipc.localhost";
pub const DEFAULT_COMMAND: &str = "get_userinfos";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown {var}: {value} (expected {expected})")]
    InvalidValue { var: &'static str, value: String, expected: &'static str },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Where and how the host command is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub invoke_url: String,
    pub command: String,
    pub arg_key: ArgKey,
    pub payload: PayloadShape,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            invoke_url: DEFAULT_INVOKE_URL.to_owned(),
            command: DEFAULT_COMMAND.to_owned(),
            arg_key: ArgKey::default(),
            payload: PayloadShape::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Provider selected when the panel opens.
    pub provider: String,
    pub fetch_policy: FetchPolicy,
    pub gateway: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { provider: DEFAULT_PROVIDER.to_owned(), fetch_policy: FetchPolicy::default(), gateway: GatewayConfig::default() }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `USERINFOS_PROVIDER`: default `Microsoft`
    /// - `USERINFOS_INVOKE_URL`: default `http://ipc.localhost`
    /// - `USERINFOS_COMMAND`: default `get_userinfos`
    /// - `USERINFOS_ARG_KEY`: `f` (default) or `fournisseur`
    /// - `USERINFOS_PAYLOAD`: `raw` (default) or `structured`
    /// - `USERINFOS_FETCH_POLICY`: `concurrent` (default) or `single_flight`
    ///
    /// # Errors
    ///
    /// Returns an error if an enumerated variable has an unknown value, or
    /// the URL or command is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = lookup("USERINFOS_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_owned());

        let invoke_url = non_empty("USERINFOS_INVOKE_URL", lookup("USERINFOS_INVOKE_URL"), DEFAULT_INVOKE_URL)?
            .trim_end_matches('/')
            .to_owned();
        let command = non_empty("USERINFOS_COMMAND", lookup("USERINFOS_COMMAND"), DEFAULT_COMMAND)?;
        let arg_key = parse_arg_key(lookup("USERINFOS_ARG_KEY").as_deref())?;
        let payload = parse_payload(lookup("USERINFOS_PAYLOAD").as_deref())?;
        let fetch_policy = parse_fetch_policy(lookup("USERINFOS_FETCH_POLICY").as_deref())?;

        Ok(Self { provider, fetch_policy, gateway: GatewayConfig { invoke_url, command, arg_key, payload } })
    }
}

fn non_empty(var: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    match raw {
        None => Ok(default.to_owned()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(value.trim().to_owned()),
    }
}

fn parse_arg_key(raw: Option<&str>) -> Result<ArgKey, ConfigError> {
    match raw.unwrap_or("f") {
        "f" => Ok(ArgKey::F),
        "fournisseur" => Ok(ArgKey::Fournisseur),
        other => Err(ConfigError::InvalidValue {
            var: "USERINFOS_ARG_KEY",
            value: other.to_owned(),
            expected: "'f' or 'fournisseur'",
        }),
    }
}

fn parse_payload(raw: Option<&str>) -> Result<PayloadShape, ConfigError> {
    match raw.unwrap_or("raw") {
        "raw" => Ok(PayloadShape::RawJson),
        "structured" => Ok(PayloadShape::Structured),
        other => Err(ConfigError::InvalidValue {
            var: "USERINFOS_PAYLOAD",
            value: other.to_owned(),
            expected: "'raw' or 'structured'",
        }),
    }
}

fn parse_fetch_policy(raw: Option<&str>) -> Result<FetchPolicy, ConfigError> {
    match raw.unwrap_or("concurrent") {
        "concurrent" => Ok(FetchPolicy::Concurrent),
        "single_flight" => Ok(FetchPolicy::SingleFlight),
        other => Err(ConfigError::InvalidValue {
            var: "USERINFOS_FETCH_POLICY",
            value: other.to_owned(),
            expected: "'concurrent' or 'single_flight'",
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
