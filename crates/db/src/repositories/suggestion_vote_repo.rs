//! Repository for the `suggestion_votes` table.

use feedboard_core::types::EntityId;

use crate::models::suggestion::{CreateSuggestionVote, SuggestionVote};
use crate::schema::SUGGESTION_VOTES;
use crate::source::{decode_maybe_single, DataError, DataSource, Filter, Query, Returning};

/// Provides insert/find/delete operations for vote records.
pub struct SuggestionVoteRepo;

impl SuggestionVoteRepo {
    fn key(suggestion_id: EntityId, user_email: &str) -> [Filter; 2] {
        [
            Filter::eq("suggestion_id", suggestion_id.to_string()),
            Filter::eq("user_email", user_email),
        ]
    }

    /// Record a vote.
    ///
    /// Returns [`DataError::Conflict`] when the voter already voted.
    pub async fn insert(
        source: &dyn DataSource,
        suggestion_id: EntityId,
        user_email: &str,
    ) -> Result<(), DataError> {
        let row = serde_json::to_value(CreateSuggestionVote {
            suggestion_id,
            user_email,
        })?;
        source
            .insert(SUGGESTION_VOTES, vec![row], Returning::Minimal)
            .await?;
        Ok(())
    }

    /// Find the vote of `user_email` on a suggestion.
    pub async fn find(
        source: &dyn DataSource,
        suggestion_id: EntityId,
        user_email: &str,
    ) -> Result<Option<SuggestionVote>, DataError> {
        let query = Query::table(SUGGESTION_VOTES)
            .eq("suggestion_id", suggestion_id.to_string())
            .eq("user_email", user_email);
        decode_maybe_single(source.select(&query).await?)
    }

    /// Remove the vote of `user_email` on a suggestion.
    pub async fn delete(
        source: &dyn DataSource,
        suggestion_id: EntityId,
        user_email: &str,
    ) -> Result<(), DataError> {
        source
            .delete(SUGGESTION_VOTES, &Self::key(suggestion_id, user_email))
            .await
    }
}
