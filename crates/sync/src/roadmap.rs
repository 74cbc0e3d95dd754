//! Public roadmap: items in the display alphabet plus reaction tallies.

use std::collections::HashMap;

use feedboard_core::roadmap::{ReactionKind, ReactionTally};
use feedboard_core::types::EntityId;
use feedboard_db::models::roadmap::{tally_reactions, CreateRoadmapItem, RoadmapItem, RoadmapItemRow};
use feedboard_db::repositories::{RoadmapReactionRepo, RoadmapRepo};
use feedboard_db::SharedSource;
use feedboard_events::SharedNotifier;

use crate::error::SyncResult;
use crate::messages;
use crate::store::Store;

/// What an [`RoadmapBoard::add_reaction`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Recorded,
    /// The same voter already left this reaction; nothing changed.
    AlreadyPresent,
}

/// Client-side state and operations for the roadmap.
pub struct RoadmapBoard {
    source: SharedSource,
    notifier: SharedNotifier,
    store: Store<RoadmapItem>,
}

impl RoadmapBoard {
    pub fn new(source: SharedSource, notifier: SharedNotifier) -> Self {
        Self {
            source,
            notifier,
            store: Store::new(),
        }
    }

    pub async fn items(&self) -> Vec<RoadmapItem> {
        self.store.snapshot().await
    }

    pub async fn get(&self, id: EntityId) -> Option<RoadmapItem> {
        self.store.get(id).await
    }

    pub async fn is_loading(&self) -> bool {
        self.store.is_loading().await
    }

    /// Reload every item newest-first, replacing local state.
    ///
    /// Items and reactions are read concurrently. When only the reactions
    /// cannot be read, items are still delivered with empty tallies. Rows
    /// whose status or priority is outside the storage alphabet are skipped.
    pub async fn fetch(&self) -> Vec<RoadmapItem> {
        let ticket = self.store.begin_fetch().await;
        let source = self.source.as_ref();

        let (rows, reactions) = tokio::join!(
            RoadmapRepo::list(source),
            RoadmapReactionRepo::list_all(source)
        );

        match rows {
            Ok(rows) => {
                let tallies = match reactions {
                    Ok(reactions) => tally_reactions(&reactions),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load roadmap reactions, tallies reset");
                        HashMap::new()
                    }
                };
                let items = map_rows(rows, &tallies);
                let count = items.len();
                if self.store.finish_fetch(ticket, Some(items)).await {
                    tracing::debug!(count, "Roadmap loaded");
                } else {
                    tracing::debug!(
                        generation = ticket.generation(),
                        "Discarding superseded roadmap fetch"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch roadmap");
                self.notifier.notify(messages::roadmap_load_failed());
                self.store.finish_fetch(ticket, None).await;
            }
        }

        self.store.snapshot().await
    }

    /// Create an item and put it at the top with an empty tally.
    pub async fn create(&self, input: &CreateRoadmapItem) -> SyncResult<RoadmapItem> {
        match self.insert_item(input).await {
            Ok(item) => {
                tracing::info!(roadmap_item_id = %item.id, status = %item.status, "Roadmap item created");
                self.store.prepend(item.clone()).await;
                self.notifier.notify(messages::roadmap_item_created());
                Ok(item)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create roadmap item");
                self.notifier.notify(messages::roadmap_item_create_failed());
                Err(e)
            }
        }
    }

    /// Record a reaction of `user_email` on an item.
    ///
    /// A repeated reaction is a silent no-op. Returns `None` when the write
    /// failed; the failure has already been reported through the notifier.
    pub async fn add_reaction(
        &self,
        item_id: EntityId,
        kind: ReactionKind,
        user_email: &str,
    ) -> Option<ReactionOutcome> {
        match RoadmapReactionRepo::insert(self.source.as_ref(), item_id, user_email, kind).await {
            Ok(()) => {
                tracing::info!(roadmap_item_id = %item_id, reaction = %kind, "Reaction recorded");
                self.store
                    .patch(item_id, |item| item.reactions.increment(kind))
                    .await;
                Some(ReactionOutcome::Recorded)
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(roadmap_item_id = %item_id, reaction = %kind, "Reaction already present");
                Some(ReactionOutcome::AlreadyPresent)
            }
            Err(e) => {
                tracing::error!(roadmap_item_id = %item_id, error = %e, "Failed to record reaction");
                self.notifier.notify(messages::reaction_failed());
                None
            }
        }
    }

    // ---- private helpers ----

    async fn insert_item(&self, input: &CreateRoadmapItem) -> SyncResult<RoadmapItem> {
        let row = RoadmapRepo::create(self.source.as_ref(), &input.to_row()).await?;
        Ok(RoadmapItem::from_row(row, ReactionTally::default())?)
    }
}

/// Map stored rows to the display alphabet, dropping unmappable ones.
fn map_rows(
    rows: Vec<RoadmapItemRow>,
    tallies: &HashMap<EntityId, ReactionTally>,
) -> Vec<RoadmapItem> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            let tally = tallies.get(&id).copied().unwrap_or_default();
            match RoadmapItem::from_row(row, tally) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(roadmap_item_id = %id, error = %e, "Skipping roadmap item");
                    None
                }
            }
        })
        .collect()
}
