#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::Serialize;

/// Provider shown when nothing else is configured.
pub const DEFAULT_PROVIDER: &str = "Microsoft";

/// One name/value pair describing an attribute of the queried user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub name: String,
    pub value: String,
}

impl PropertyRow {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Observable state of the panel.
///
/// `busy` is only true while a fetch is in flight. `error_message` is only
/// non-empty after a failed fetch, and is cleared when the next one starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub provider: String,
    /// Display order is insertion order.
    pub rows: Vec<PropertyRow>,
    pub busy: bool,
    pub error_message: String,
}

impl PanelState {
    pub fn new(provider: impl Into<String>) -> Self {
        Self { provider: provider.into(), rows: Vec::new(), busy: false, error_message: String::new() }
    }

    /// `true` when the last fetch failed and no new one has started.
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER)
    }
}
