//! Client configuration.
//!
//! Everything the original integrations kept as module globals or probed
//! from the ambient environment is injected here instead.

use crate::error::{CmsError, CmsResult};
use serde::{Deserialize, Serialize};

/// Where the SDK is executing.
///
/// Server-rendered passes have no per-user cache and no authoring session,
/// so cache access and the registration trampoline are disabled there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeContext {
    /// Interactive client: cache and registration are active.
    Client,
    /// Server-rendered pass: network fetches only.
    Server,
}

impl RuntimeContext {
    /// Returns true for the interactive client context.
    #[must_use]
    pub const fn is_client(self) -> bool {
        matches!(self, Self::Client)
    }
}

/// Configuration for the CMS client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Base URL of the CMS service.
    pub base_url: String,
    /// Project identifier scoping every request and cache key.
    pub project_id: String,
    /// API key for field registration. Registration never posts without one.
    pub api_key: Option<String>,
    /// Whether this run is a content-authoring session.
    pub authoring: bool,
    /// Execution context capability.
    pub context: RuntimeContext,
    /// Delay before the registration trampoline probes listening mode (ms).
    pub registration_delay_ms: u64,
    /// Timeout for CMS requests (ms).
    pub request_timeout_ms: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://elegant-cheetah-861.convex.site".to_string(),
            project_id: String::new(),
            api_key: None,
            authoring: false,
            context: RuntimeContext::Client,
            registration_delay_ms: 500,
            request_timeout_ms: 60_000,
        }
    }
}

impl CmsConfig {
    /// Checks the parts every request depends on.
    pub fn validate(&self) -> CmsResult<()> {
        if self.base_url.is_empty() {
            return Err(CmsError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.project_id.is_empty() {
            return Err(CmsError::Configuration(
                "project_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
