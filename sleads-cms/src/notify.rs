//! Host notifications.
//!
//! Structured replacement for blocking browser alerts: the SDK emits
//! typed notices and the host decides how to render them.

use tracing::{info, warn};

/// A user-visible notice emitted by the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend is in an authoring session and expects registration.
    ListeningModeActive,
    /// The rendered field set was registered with the backend.
    FieldsRegistered,
    /// Registration was attempted and did not complete.
    RegistrationFailed { reason: String },
    /// Debug snapshot of the ids currently in the collection.
    FieldsSnapshot { ids: Vec<String> },
}

/// Receives notices for the host UI to render.
pub trait Notifier: Send + Sync {
    /// Delivers one notice.
    fn notify(&self, notice: Notice);
}

/// Default notifier: routes notices to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::RegistrationFailed { reason } => warn!("field registration failed: {reason}"),
            Notice::ListeningModeActive => info!("CMS listening mode is active"),
            Notice::FieldsRegistered => info!("fields registered with the CMS"),
            Notice::FieldsSnapshot { ids } => info!("current fields: {}", ids.join(", ")),
        }
    }
}
