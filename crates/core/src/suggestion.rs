//! Suggestion lifecycle statuses.
//!
//! The backend stores the Portuguese labels shown on the board; the enum
//! variants carry the English names used in code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionStatus {
    #[serde(rename = "Recebido")]
    Received,
    #[serde(rename = "Em análise")]
    UnderReview,
    #[serde(rename = "Em desenvolvimento")]
    InDevelopment,
    #[serde(rename = "Concluído")]
    Completed,
    #[serde(rename = "Rejeitado")]
    Rejected,
}

impl SuggestionStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [SuggestionStatus; 5] = [
        Self::Received,
        Self::UnderReview,
        Self::InDevelopment,
        Self::Completed,
        Self::Rejected,
    ];

    /// Persisted label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Received => "Recebido",
            Self::UnderReview => "Em análise",
            Self::InDevelopment => "Em desenvolvimento",
            Self::Completed => "Concluído",
            Self::Rejected => "Rejeitado",
        }
    }

    /// Kebab-case name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::UnderReview => "under-review",
            Self::InDevelopment => "in-development",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl Default for SuggestionStatus {
    fn default() -> Self {
        Self::Received
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the persisted label or the slug.
impl FromStr for SuggestionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s || status.slug() == s)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "suggestion status",
                value: s.to_string(),
            })
    }
}
