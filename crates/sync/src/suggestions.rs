//! Suggestion board: list, submit, triage and vote.

use std::sync::atomic::{AtomicBool, Ordering};

use feedboard_core::suggestion::SuggestionStatus;
use feedboard_core::types::EntityId;
use feedboard_db::models::suggestion::{CreateSuggestion, Suggestion};
use feedboard_db::repositories::{SuggestionRepo, SuggestionVoteRepo};
use feedboard_db::{DataError, SharedSource};
use feedboard_events::SharedNotifier;

use crate::error::SyncResult;
use crate::messages;
use crate::store::Store;

/// What a [`SuggestionBoard::vote`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    Added,
    Removed,
}

/// Client-side state and operations for the suggestion board.
pub struct SuggestionBoard {
    source: SharedSource,
    notifier: SharedNotifier,
    store: Store<Suggestion>,
    /// Visibility used by the most recent fetch; reused by `vote`.
    include_private: AtomicBool,
}

impl SuggestionBoard {
    pub fn new(source: SharedSource, notifier: SharedNotifier) -> Self {
        Self {
            source,
            notifier,
            store: Store::new(),
            include_private: AtomicBool::new(false),
        }
    }

    pub async fn suggestions(&self) -> Vec<Suggestion> {
        self.store.snapshot().await
    }

    pub async fn get(&self, id: EntityId) -> Option<Suggestion> {
        self.store.get(id).await
    }

    pub async fn is_loading(&self) -> bool {
        self.store.is_loading().await
    }

    /// Reload the board newest-first, replacing local state.
    ///
    /// Private suggestions are included only when `include_private` is set.
    /// Failures are reported through the notifier and leave the list as it
    /// was. Returns the list as it stands afterwards.
    pub async fn fetch(&self, include_private: bool) -> Vec<Suggestion> {
        self.include_private.store(include_private, Ordering::Relaxed);
        let ticket = self.store.begin_fetch().await;

        match SuggestionRepo::list(self.source.as_ref(), include_private).await {
            Ok(rows) => {
                let count = rows.len();
                if self.store.finish_fetch(ticket, Some(rows)).await {
                    tracing::debug!(count, include_private, "Suggestions loaded");
                } else {
                    tracing::debug!(
                        generation = ticket.generation(),
                        "Discarding superseded suggestions fetch"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch suggestions");
                self.notifier.notify(messages::suggestions_load_failed());
                self.store.finish_fetch(ticket, None).await;
            }
        }

        self.store.snapshot().await
    }

    /// Submit a suggestion and put it at the top of the board.
    pub async fn create(&self, input: &CreateSuggestion) -> SyncResult<Suggestion> {
        match SuggestionRepo::create(self.source.as_ref(), input).await {
            Ok(suggestion) => {
                tracing::info!(suggestion_id = %suggestion.id, "Suggestion created");
                self.store.prepend(suggestion.clone()).await;
                self.notifier.notify(messages::suggestion_created());
                Ok(suggestion)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create suggestion");
                self.notifier.notify(messages::suggestion_create_failed());
                Err(e.into())
            }
        }
    }

    /// Move a suggestion to `status`. Only the status of the local copy is
    /// patched.
    pub async fn update_status(
        &self,
        id: EntityId,
        status: SuggestionStatus,
    ) -> SyncResult<Suggestion> {
        match SuggestionRepo::update_status(self.source.as_ref(), id, status).await {
            Ok(updated) => {
                tracing::info!(suggestion_id = %id, status = %updated.status, "Suggestion status updated");
                let new_status = updated.status;
                self.store.patch(id, |s| s.status = new_status).await;
                self.notifier.notify(messages::status_updated());
                Ok(updated)
            }
            Err(e) => {
                tracing::error!(suggestion_id = %id, error = %e, "Failed to update suggestion status");
                self.notifier.notify(messages::status_update_failed());
                Err(e.into())
            }
        }
    }

    /// Toggle the vote of `user_email` on a suggestion, then reload the
    /// board to pick up the backend's counter.
    ///
    /// Returns `None` when the toggle failed; the failure has already been
    /// reported through the notifier.
    pub async fn vote(&self, id: EntityId, user_email: &str) -> Option<VoteChange> {
        match self.toggle_vote(id, user_email).await {
            Ok(change) => {
                tracing::info!(suggestion_id = %id, ?change, "Vote toggled");
                let include_private = self.include_private.load(Ordering::Relaxed);
                self.fetch(include_private).await;
                Some(change)
            }
            Err(e) => {
                tracing::error!(suggestion_id = %id, error = %e, "Failed to toggle vote");
                self.notifier.notify(messages::vote_failed());
                None
            }
        }
    }

    // ---- private helpers ----

    /// Insert first; the unique constraint tells us the vote already exists.
    async fn toggle_vote(&self, id: EntityId, user_email: &str) -> Result<VoteChange, DataError> {
        let source = self.source.as_ref();
        match SuggestionVoteRepo::insert(source, id, user_email).await {
            Ok(()) => {
                SuggestionRepo::increment_votes(source, id).await?;
                Ok(VoteChange::Added)
            }
            Err(e) if e.is_conflict() => {
                SuggestionVoteRepo::delete(source, id, user_email).await?;
                SuggestionRepo::decrement_votes(source, id).await?;
                Ok(VoteChange::Removed)
            }
            Err(e) => Err(e),
        }
    }
}
