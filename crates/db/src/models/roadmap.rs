//! Roadmap item and reaction rows.
//!
//! [`RoadmapItemRow`] is the row exactly as stored, with status and
//! priority in the storage alphabet. [`RoadmapItem`] is the entity handed to
//! callers: display alphabet plus a reaction tally.

use std::collections::HashMap;

use chrono::NaiveDate;
use feedboard_core::error::CoreError;
use feedboard_core::roadmap::{ReactionKind, ReactionTally, RoadmapPriority, RoadmapStatus};
use feedboard_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `roadmap_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItemRow {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Storage name, e.g. `"em-desenvolvimento"`.
    pub status: String,
    /// Storage name, e.g. `"alta"`.
    pub priority: String,
    #[serde(default)]
    pub estimated_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub product: String,
    pub votes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for `roadmap_items`, already in the storage alphabet.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoadmapItem {
    pub title: String,
    pub description: String,
    pub status: &'static str,
    pub priority: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_date: Option<NaiveDate>,
    pub product: String,
}

/// DTO for creating a roadmap item, in the display alphabet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoadmapItem {
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    pub priority: RoadmapPriority,
    #[serde(default)]
    pub estimated_date: Option<NaiveDate>,
    pub product: String,
}

impl CreateRoadmapItem {
    /// Map to the storage alphabet.
    pub fn to_row(&self) -> NewRoadmapItem {
        NewRoadmapItem {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.storage_name(),
            priority: self.priority.storage_name(),
            estimated_date: self.estimated_date,
            product: self.product.clone(),
        }
    }
}

/// A roadmap item as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    pub priority: RoadmapPriority,
    pub estimated_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product: String,
    pub votes: i64,
    pub reactions: ReactionTally,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoadmapItem {
    /// Map a stored row to the display alphabet and attach `reactions`.
    ///
    /// Fails when the row carries a status or priority outside the storage
    /// alphabet.
    pub fn from_row(row: RoadmapItemRow, reactions: ReactionTally) -> Result<Self, CoreError> {
        Ok(Self {
            status: RoadmapStatus::from_storage(&row.status)?,
            priority: RoadmapPriority::from_storage(&row.priority)?,
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_date: row.estimated_date,
            start_date: row.start_date,
            end_date: row.end_date,
            product: row.product,
            votes: row.votes,
            reactions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `roadmap_reactions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapReaction {
    pub id: EntityId,
    pub roadmap_item_id: EntityId,
    pub user_email: String,
    pub reaction_type: ReactionKind,
    pub created_at: Timestamp,
}

/// DTO for recording a reaction.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRoadmapReaction<'a> {
    pub roadmap_item_id: EntityId,
    pub user_email: &'a str,
    pub reaction_type: ReactionKind,
}

/// Aggregate persisted reactions into per-item tallies.
pub fn tally_reactions(reactions: &[RoadmapReaction]) -> HashMap<EntityId, ReactionTally> {
    let mut tallies: HashMap<EntityId, ReactionTally> = HashMap::new();
    for reaction in reactions {
        tallies
            .entry(reaction.roadmap_item_id)
            .or_default()
            .increment(reaction.reaction_type);
    }
    tallies
}
