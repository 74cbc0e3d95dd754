//! Repository for the `suggestions` table and its vote counters.

use feedboard_core::suggestion::SuggestionStatus;
use feedboard_core::types::EntityId;
use serde_json::json;

use crate::models::suggestion::{CreateSuggestion, Suggestion, UpdateSuggestionStatus};
use crate::schema::{
    CREATED_AT, DECREMENT_SUGGESTION_VOTES, ID, INCREMENT_SUGGESTION_VOTES, SUGGESTIONS,
    SUGGESTION_ID_ARG,
};
use crate::source::{
    decode_rows, decode_single, DataError, DataSource, Direction, Filter, Query, Returning,
};

/// Provides list/create/update operations for suggestions.
pub struct SuggestionRepo;

impl SuggestionRepo {
    /// List suggestions newest-first, public ones only unless
    /// `include_private` is set.
    pub async fn list(
        source: &dyn DataSource,
        include_private: bool,
    ) -> Result<Vec<Suggestion>, DataError> {
        let mut query = Query::table(SUGGESTIONS).order_by(CREATED_AT, Direction::Descending);
        if !include_private {
            query = query.eq("is_public", true);
        }
        decode_rows(source.select(&query).await?)
    }

    /// Create a suggestion, returning the full row.
    pub async fn create(
        source: &dyn DataSource,
        input: &CreateSuggestion,
    ) -> Result<Suggestion, DataError> {
        let rows = source
            .insert(
                SUGGESTIONS,
                vec![serde_json::to_value(input)?],
                Returning::Representation,
            )
            .await?;
        decode_single(rows)
    }

    /// Update only the status of a suggestion, returning the full row.
    pub async fn update_status(
        source: &dyn DataSource,
        id: EntityId,
        status: SuggestionStatus,
    ) -> Result<Suggestion, DataError> {
        let rows = source
            .update(
                SUGGESTIONS,
                serde_json::to_value(UpdateSuggestionStatus { status })?,
                &[Filter::eq(ID, id.to_string())],
                Returning::Representation,
            )
            .await?;
        decode_single(rows)
    }

    /// Ask the backend to bump the vote counter by one.
    pub async fn increment_votes(source: &dyn DataSource, id: EntityId) -> Result<(), DataError> {
        source
            .rpc(INCREMENT_SUGGESTION_VOTES, json!({ SUGGESTION_ID_ARG: id }))
            .await?;
        Ok(())
    }

    /// Ask the backend to lower the vote counter by one.
    pub async fn decrement_votes(source: &dyn DataSource, id: EntityId) -> Result<(), DataError> {
        source
            .rpc(DECREMENT_SUGGESTION_VOTES, json!({ SUGGESTION_ID_ARG: id }))
            .await?;
        Ok(())
    }
}
