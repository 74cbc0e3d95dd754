//! Changelog feed: append-only release notes.

use feedboard_db::models::changelog::{ChangelogEntry, CreateChangelogEntry};
use feedboard_db::repositories::ChangelogRepo;
use feedboard_db::SharedSource;
use feedboard_events::SharedNotifier;

use crate::error::SyncResult;
use crate::messages;
use crate::store::Store;

/// Client-side state and operations for the changelog.
pub struct ChangelogFeed {
    source: SharedSource,
    notifier: SharedNotifier,
    store: Store<ChangelogEntry>,
}

impl ChangelogFeed {
    pub fn new(source: SharedSource, notifier: SharedNotifier) -> Self {
        Self {
            source,
            notifier,
            store: Store::new(),
        }
    }

    pub async fn entries(&self) -> Vec<ChangelogEntry> {
        self.store.snapshot().await
    }

    pub async fn is_loading(&self) -> bool {
        self.store.is_loading().await
    }

    /// Reload entries by release date, most recent first.
    pub async fn fetch(&self) -> Vec<ChangelogEntry> {
        let ticket = self.store.begin_fetch().await;

        match ChangelogRepo::list(self.source.as_ref()).await {
            Ok(entries) => {
                let count = entries.len();
                if self.store.finish_fetch(ticket, Some(entries)).await {
                    tracing::debug!(count, "Changelog loaded");
                } else {
                    tracing::debug!(
                        generation = ticket.generation(),
                        "Discarding superseded changelog fetch"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch changelog");
                self.notifier.notify(messages::changelog_load_failed());
                self.store.finish_fetch(ticket, None).await;
            }
        }

        self.store.snapshot().await
    }

    /// Publish an entry. A missing `content_type` is sent as `text`.
    pub async fn create(&self, input: &CreateChangelogEntry) -> SyncResult<ChangelogEntry> {
        let input = CreateChangelogEntry {
            content_type: Some(input.content_type.unwrap_or_default()),
            ..input.clone()
        };

        match ChangelogRepo::create(self.source.as_ref(), &input).await {
            Ok(entry) => {
                tracing::info!(changelog_entry_id = %entry.id, version = %entry.version, "Changelog entry created");
                self.store.prepend(entry.clone()).await;
                self.notifier.notify(messages::changelog_created());
                Ok(entry)
            }
            Err(e) => {
                tracing::error!(version = %input.version, error = %e, "Failed to create changelog entry");
                self.notifier.notify(messages::changelog_create_failed());
                Err(e.into())
            }
        }
    }
}
