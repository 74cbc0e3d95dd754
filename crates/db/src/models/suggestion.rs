//! Suggestion and suggestion-vote rows.

use feedboard_core::suggestion::SuggestionStatus;
use feedboard_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `suggestions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Product area the suggestion targets, e.g. `"Workspace"`.
    pub module: String,
    pub email: String,
    #[serde(default)]
    pub youtube_url: Option<String>,
    pub is_public: bool,
    pub status: SuggestionStatus,
    pub priority: String,
    /// Maintained by the backend vote-counter procedures.
    pub votes: i64,
    pub comments_count: i64,
    #[serde(default)]
    pub admin_response: Option<String>,
    pub is_pinned: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new suggestion.
///
/// Status, priority and counters are left to the backend defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSuggestion {
    pub title: String,
    pub description: String,
    pub module: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    pub is_public: bool,
}

/// DTO for changing a suggestion's status.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateSuggestionStatus {
    pub status: SuggestionStatus,
}

/// A row from the `suggestion_votes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionVote {
    pub id: EntityId,
    pub suggestion_id: EntityId,
    pub user_email: String,
    pub created_at: Timestamp,
}

/// DTO for recording a vote.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSuggestionVote<'a> {
    pub suggestion_id: EntityId,
    pub user_email: &'a str,
}
