//! The notification capability and its tracing-backed implementation.

use std::sync::Arc;

use crate::toast::{Severity, Toast};

/// Fire-and-forget sink for toasts.
///
/// Implementations must not block and must not fail; a toast that cannot
/// be shown is dropped.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Shared handle to a notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Renders toasts as log lines. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.severity {
            Severity::Default => {
                tracing::info!(title = %toast.title, "{}", toast.description)
            }
            Severity::Destructive => {
                tracing::warn!(title = %toast.title, "{}", toast.description)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_notifier_accepts_both_severities() {
        let notifier: SharedNotifier = Arc::new(LogNotifier);
        notifier.notify(Toast::success("Saved", "ok"));
        notifier.notify(Toast::destructive("Failed", "not ok"));
    }
}
