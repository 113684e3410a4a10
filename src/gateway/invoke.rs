//! Host shell IPC bridge.
//!
//! Desktop shells expose their commands to the webview as HTTP-style IPC:
//! `POST {invoke_url}/{command}` with the command arguments as a JSON object.
//! A 2xx answer carries the command's return value, anything else carries the
//! error the command returned. Pure helpers (`request_body`,
//! `rejection_message`) are kept separate for testability.

#[cfg(test)]
#[path = "invoke_test.rs"]
mod invoke_test;

use serde_json::{Map, Value};
use tracing::debug;

use super::payload::{PayloadShape, decode_rows};
use super::{BackendGateway, GatewayError};
use crate::config::GatewayConfig;
use crate::panel::PropertyRow;

/// Name of the command argument that carries the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgKey {
    #[default]
    F,
    Fournisseur,
}

impl ArgKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F => "f",
            Self::Fournisseur => "fournisseur",
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct InvokeGateway {
    http: reqwest::Client,
    endpoint: String,
    arg_key: ArgKey,
    shape: PayloadShape,
}

impl InvokeGateway {
    /// Build a gateway for the configured host command.
    ///
    /// No request timeout is set: a fetch waits for as long as the host
    /// command runs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Setup`] if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Setup(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: command_endpoint(&config.invoke_url, &config.command),
            arg_key: config.arg_key,
            shape: config.payload,
        })
    }

    /// Full URL the command is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl BackendGateway for InvokeGateway {
    async fn fetch_user_infos(&self, provider: &str) -> Result<Vec<PropertyRow>, GatewayError> {
        debug!(endpoint = %self.endpoint, provider, "invoking host command");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request_body(self.arg_key, provider))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Rejected(rejection_message(status.as_u16(), &text)));
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
        decode_rows(self.shape, body)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn command_endpoint(invoke_url: &str, command: &str) -> String {
    format!("{}/{}", invoke_url.trim_end_matches('/'), command.trim_start_matches('/'))
}

/// Argument object for the command: `{ "<arg_key>": provider }`.
fn request_body(arg_key: ArgKey, provider: &str) -> Value {
    let mut args = Map::new();
    args.insert(arg_key.as_str().to_owned(), Value::String(provider.to_owned()));
    Value::Object(args)
}

/// Commands reject with a serialized error, usually a bare JSON string.
fn rejection_message(status: u16, text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(message)) => message,
        _ if text.trim().is_empty() => format!("host returned status {status}"),
        _ => text.trim().to_owned(),
    }
}
