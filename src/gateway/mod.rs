//! Gateway: the boundary to the host shell's `get_userinfos` command.
//!
//! DESIGN
//! ======
//! The panel only sees [`BackendGateway`]: one async call that turns a
//! provider name into an ordered list of rows. How the host is reached, which
//! argument key it expects, and how its payload is shaped are adapter
//! concerns handled by the implementations in this module.

pub mod fixture;
pub mod invoke;
pub mod payload;

pub use fixture::FixtureGateway;
pub use invoke::{ArgKey, InvokeGateway};
pub use payload::PayloadShape;

use crate::panel::PropertyRow;

// =============================================================================
// ERROR
// =============================================================================

/// Failure of a backend call. The panel surfaces the `Display` text as-is.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The host command ran and reported an error message.
    #[error("{0}")]
    Rejected(String),

    /// The host could not be reached.
    #[error("host unreachable: {0}")]
    Transport(String),

    /// The host answered with a payload that is not a list of rows.
    #[error("malformed payload: {0}")]
    Decode(String),

    /// The gateway has no data for this provider.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// The gateway could not be constructed.
    #[error("gateway setup failed: {0}")]
    Setup(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// Capability that performs the user-info lookup for a provider.
#[async_trait::async_trait]
pub trait BackendGateway: Send + Sync {
    /// Fetch the property rows for `provider`, in display order.
    async fn fetch_user_infos(&self, provider: &str) -> Result<Vec<PropertyRow>, GatewayError>;
}
