//! The toast envelope handed to every [`Notifier`](crate::Notifier).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual weight of a toast. `Destructive` marks a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

/// A short user-facing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            raised_at: Utc::now(),
        }
    }

    /// A toast reporting a completed operation.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Default)
    }

    /// A toast reporting a failed operation.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Destructive)
    }

    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Destructive
    }
}
