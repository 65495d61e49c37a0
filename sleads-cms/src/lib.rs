//! Sleads CMS client for Rust hosts.
//!
//! Fetches per-page field content from the Sleads CMS service, caches it
//! locally with a 30-day TTL, merges live refreshes into an in-memory
//! collection and answers synchronous lookups from rendering code. An
//! opt-in authoring mode reports the rendered fields back to the backend.
//!
//! # Architecture
//!
//! - **Config**: injected [`CmsConfig`] with an explicit [`RuntimeContext`]
//!   capability instead of ambient environment probes
//! - **Api**: thin reqwest wrapper over the three CMS endpoints
//! - **Store**: the live field collection and its bookkeeping
//! - **Session**: the refresh protocol, lookup and registration trampoline
//!
//! ## Refresh cycle
//!
//! 1. **De-dup**: a fetch key whose refresh already completed is skipped
//! 2. **Cache**: a fresh-enough cached set renders before the network
//! 3. **Fetch**: the network result is persisted and merged on top
//! 4. **Register**: authoring sessions report the rendered fields
//!
//! # Example
//!
//! ```
//! use sleads_cms::{CmsConfig, CmsSession, StaticLanguages};
//! use std::sync::Arc;
//!
//! let config = CmsConfig {
//!     project_id: "demo-project".to_string(),
//!     ..Default::default()
//! };
//! let session = CmsSession::new(config, Arc::new(StaticLanguages::default())).unwrap();
//!
//! // no content yet: lookups fall back to the caller's default
//! assert_eq!(session.c("headline", "Welcome"), "Welcome");
//! ```

mod api;
mod config;
mod error;
mod language;
mod notify;
mod session;
pub mod store;

pub use api::{CmsApi, RegisteredField};
pub use config::{CmsConfig, RuntimeContext};
pub use error::{CmsError, CmsResult};
pub use language::{LanguageProvider, StaticLanguages};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use session::CmsSession;
pub use store::{FieldStore, RegistrationPhase};
