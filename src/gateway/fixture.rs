//! Offline gateway backed by a JSON fixture.
//!
//! The fixture maps provider names to either an array of rows (the lookup
//! succeeds) or a string (the lookup is rejected with that message):
//!
//! ```json
//! {
//!   "Microsoft": [{ "name": "tenant", "value": "contoso" }],
//!   "Google": "network unreachable"
//! }
//! ```

#[cfg(test)]
#[path = "fixture_test.rs"]
mod fixture_test;

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::payload::decode_list;
use super::{BackendGateway, GatewayError};
use crate::panel::PropertyRow;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FixtureEntry {
    Rows(Vec<PropertyRow>),
    Rejection(String),
}

#[derive(Debug, Clone, Default)]
pub struct FixtureGateway {
    entries: HashMap<String, FixtureEntry>,
}

impl FixtureGateway {
    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Setup`] if the file cannot be read, or
    /// [`GatewayError::Decode`] if its contents are not a valid fixture.
    pub async fn load(path: &Path) -> Result<Self, GatewayError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Setup(format!("{}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a fixture from an already-parsed JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] if `value` is not an object, or an
    /// entry is neither a row array nor a string.
    pub fn from_value(value: Value) -> Result<Self, GatewayError> {
        let Value::Object(map) = value else {
            return Err(GatewayError::Decode("fixture must be a JSON object keyed by provider".to_owned()));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (provider, entry) in map {
            let entry = match entry {
                Value::String(message) => FixtureEntry::Rejection(message),
                rows => FixtureEntry::Rows(
                    decode_list(rows).map_err(|e| GatewayError::Decode(format!("provider {provider}: {e}")))?,
                ),
            };
            entries.insert(provider, entry);
        }
        Ok(Self { entries })
    }

    /// Add or replace the rows returned for `provider`.
    #[must_use]
    pub fn with_rows(mut self, provider: impl Into<String>, rows: Vec<PropertyRow>) -> Self {
        self.entries.insert(provider.into(), FixtureEntry::Rows(rows));
        self
    }

    /// Make lookups for `provider` fail with `message`.
    #[must_use]
    pub fn with_rejection(mut self, provider: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(provider.into(), FixtureEntry::Rejection(message.into()));
        self
    }

    /// Known provider names, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait::async_trait]
impl BackendGateway for FixtureGateway {
    async fn fetch_user_infos(&self, provider: &str) -> Result<Vec<PropertyRow>, GatewayError> {
        match self.entries.get(provider) {
            Some(FixtureEntry::Rows(rows)) => Ok(rows.clone()),
            Some(FixtureEntry::Rejection(message)) => Err(GatewayError::Rejected(message.clone())),
            None => Err(GatewayError::UnknownProvider(provider.to_owned())),
        }
    }
}
