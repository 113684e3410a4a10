//! UserInfoPanel: provider field, fetch action, property rows.
//!
//! DESIGN
//! ======
//! The four observables (`provider`, `rows`, `busy`, `error_message`) live in
//! one [`PanelState`] held by a `watch` channel. Every mutation goes through
//! the sender, so each one is also the "state changed" notification: binding
//! layers keep a receiver from [`UserInfoPanel::subscribe`] and re-render
//! when it changes.
//!
//! The backend lookup is an injected [`BackendGateway`]. Gateway failures are
//! never returned to the caller; they land in `error_message` and the log.
//!
//! CONCURRENCY
//! ===========
//! State is only touched inside short synchronous closures; a fetch suspends
//! only while the gateway call is pending. Under [`FetchPolicy::Concurrent`]
//! overlapping fetches are allowed and the last one to resolve wins on
//! `rows`, `error_message` and `busy`. [`FetchPolicy::SingleFlight`] ignores a
//! fetch requested while another is in flight.

pub mod state;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::gateway::BackendGateway;
pub use state::{DEFAULT_PROVIDER, PanelState, PropertyRow};

/// What to do with a fetch requested while another is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Run it; the last fetch to resolve wins.
    #[default]
    Concurrent,
    /// Ignore it.
    SingleFlight,
}

/// Result of one `fetch_user_infos` call, for callers that await it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The rows were replaced; carries the new row count.
    Loaded(usize),
    /// The gateway failed; carries the message now shown in the panel.
    Failed(String),
    /// Not started because a fetch was already in flight.
    Skipped,
}

pub struct UserInfoPanel {
    state: watch::Sender<PanelState>,
    gateway: Arc<dyn BackendGateway>,
    policy: FetchPolicy,
}

impl UserInfoPanel {
    pub fn new(gateway: Arc<dyn BackendGateway>, provider: impl Into<String>) -> Self {
        Self::with_policy(gateway, provider, FetchPolicy::default())
    }

    pub fn with_policy(gateway: Arc<dyn BackendGateway>, provider: impl Into<String>, policy: FetchPolicy) -> Self {
        let (state, _) = watch::channel(PanelState::new(provider));
        Self { state, gateway, policy }
    }

    pub fn from_config(gateway: Arc<dyn BackendGateway>, config: &AppConfig) -> Self {
        Self::with_policy(gateway, config.provider.clone(), config.fetch_policy)
    }

    /// Receiver that is marked changed after every state mutation.
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// Replace the provider name. The value is not validated.
    pub fn set_provider(&self, provider: impl Into<String>) {
        let provider = provider.into();
        self.state.send_if_modified(|s| {
            if s.provider == provider {
                return false;
            }
            s.provider = provider;
            true
        });
    }

    /// Empty the row list locally. Always succeeds.
    pub fn clear_rows(&self) -> bool {
        self.state.send_modify(|s| s.rows.clear());
        true
    }

    /// Look up the current provider through the gateway.
    ///
    /// Clears `error_message` and sets `busy` before the call. On success the
    /// rows are replaced wholesale; on failure they are left alone and the
    /// error text is shown instead. `busy` is reset either way.
    pub async fn fetch_user_infos(&self) -> FetchOutcome {
        let single_flight = self.policy == FetchPolicy::SingleFlight;
        let mut started = None;
        self.state.send_if_modified(|s| {
            if single_flight && s.busy {
                return false;
            }
            s.busy = true;
            s.error_message.clear();
            started = Some(s.provider.clone());
            true
        });

        let Some(provider) = started else {
            debug!("fetch ignored: another fetch is in flight");
            return FetchOutcome::Skipped;
        };

        info!(provider = %provider, "fetching user infos");
        match self.gateway.fetch_user_infos(&provider).await {
            Ok(rows) => {
                let count = rows.len();
                self.state.send_modify(|s| {
                    s.rows = rows;
                    s.busy = false;
                });
                info!(provider = %provider, rows = count, "user infos loaded");
                FetchOutcome::Loaded(count)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(provider = %provider, error = %message, "get_userinfos failed");
                self.state.send_modify(|s| {
                    s.error_message.clone_from(&message);
                    s.busy = false;
                });
                FetchOutcome::Failed(message)
            }
        }
    }
}
