//! User-feedback collaborators consumed by the session controller.
//!
//! Both are injected explicitly at construction time; nothing in the core
//! reaches for a global notification singleton. Notifications are
//! fire-and-forget and never affect control-flow correctness; the confirm
//! prompt is the one collaborator whose answer gates an action.

use async_trait::async_trait;
use tracing::{error, info, warn};

/// Toast/notification sink.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Confirmation prompt: resolves `true` when the user accepts, `false` when
/// the action should be abandoned.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Routes notifications to structured logging; the headless default.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        error!(kind = "error", "{message}");
    }

    fn info(&self, message: &str) {
        info!(kind = "info", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(kind = "warning", "{message}");
    }
}

/// Prompt with a fixed answer, for headless use and tests.
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
