//! Repository for the `roadmap_reactions` table.

use feedboard_core::roadmap::ReactionKind;
use feedboard_core::types::EntityId;

use crate::models::roadmap::{CreateRoadmapReaction, RoadmapReaction};
use crate::schema::ROADMAP_REACTIONS;
use crate::source::{
    decode_maybe_single, decode_rows, DataError, DataSource, Query, Returning,
};

/// Provides insert/find/list operations for reaction records.
pub struct RoadmapReactionRepo;

impl RoadmapReactionRepo {
    /// Record a reaction.
    ///
    /// Returns [`DataError::Conflict`] when the same voter already left the
    /// same kind of reaction on the item.
    pub async fn insert(
        source: &dyn DataSource,
        roadmap_item_id: EntityId,
        user_email: &str,
        reaction_type: ReactionKind,
    ) -> Result<(), DataError> {
        let row = serde_json::to_value(CreateRoadmapReaction {
            roadmap_item_id,
            user_email,
            reaction_type,
        })?;
        source
            .insert(ROADMAP_REACTIONS, vec![row], Returning::Minimal)
            .await?;
        Ok(())
    }

    pub async fn find(
        source: &dyn DataSource,
        roadmap_item_id: EntityId,
        user_email: &str,
        reaction_type: ReactionKind,
    ) -> Result<Option<RoadmapReaction>, DataError> {
        let query = Query::table(ROADMAP_REACTIONS)
            .eq("roadmap_item_id", roadmap_item_id.to_string())
            .eq("user_email", user_email)
            .eq("reaction_type", reaction_type.as_str());
        decode_maybe_single(source.select(&query).await?)
    }

    /// Every persisted reaction, for rebuilding tallies.
    pub async fn list_all(source: &dyn DataSource) -> Result<Vec<RoadmapReaction>, DataError> {
        decode_rows(source.select(&Query::table(ROADMAP_REACTIONS)).await?)
    }
}
