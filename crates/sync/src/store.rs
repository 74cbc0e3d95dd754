//! Module-owned entity list with a loading flag and fetch generations.
//!
//! Every fetch takes a [`FetchTicket`] from [`Store::begin_fetch`]. Only
//! the ticket of the most recent fetch may complete it; results carried
//! by an older ticket are dropped, loading flag included. The lock is
//! held for the duration of one mutation only, never across a remote call.

use feedboard_core::types::EntityId;
use feedboard_db::models::changelog::ChangelogEntry;
use feedboard_db::models::roadmap::RoadmapItem;
use feedboard_db::models::suggestion::Suggestion;
use tokio::sync::RwLock;

/// Entities addressable by id inside a [`Store`].
pub trait Keyed {
    fn key(&self) -> EntityId;
}

impl Keyed for Suggestion {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for RoadmapItem {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for ChangelogEntry {
    fn key(&self) -> EntityId {
        self.id
    }
}

/// Generation token identifying one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

struct Inner<T> {
    items: Vec<T>,
    loading: bool,
    generation: u64,
}

/// Ordered in-memory mirror of one remote collection.
pub struct Store<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Keyed + Clone> Store<T> {
    /// An empty store, not loading.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                loading: false,
                generation: 0,
            }),
        }
    }

    /// Start a fetch: raise the loading flag and supersede every earlier
    /// ticket.
    pub async fn begin_fetch(&self) -> FetchTicket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.loading = true;
        FetchTicket(inner.generation)
    }

    /// Complete a fetch.
    ///
    /// With a current ticket, `rows` (if any) replace the list wholesale and
    /// the loading flag drops. A superseded ticket changes nothing. Returns
    /// whether the ticket was current.
    pub async fn finish_fetch(&self, ticket: FetchTicket, rows: Option<Vec<T>>) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.0 != inner.generation {
            return false;
        }
        if let Some(rows) = rows {
            inner.items = rows;
        }
        inner.loading = false;
        true
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.inner.read().await.items.clone()
    }

    pub async fn get(&self, id: EntityId) -> Option<T> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.key() == id)
            .cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    /// Insert `item` at the front.
    pub async fn prepend(&self, item: T) {
        self.inner.write().await.items.insert(0, item);
    }

    /// Apply `f` to the entity with `id`. Returns `false` when absent.
    pub async fn patch<F>(&self, id: EntityId, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        match inner.items.iter_mut().find(|item| item.key() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }
}

impl<T: Keyed + Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Keyed for Item {
        fn key(&self) -> EntityId {
            self.id
        }
    }

    fn item(label: &'static str) -> Item {
        Item {
            id: Uuid::new_v4(),
            label,
        }
    }

    #[tokio::test]
    async fn starts_empty_and_idle() {
        let store: Store<Item> = Store::new();
        assert!(store.is_empty().await);
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn fetch_toggles_loading_and_replaces_items() {
        let store = Store::new();
        store.prepend(item("stale")).await;

        let ticket = store.begin_fetch().await;
        assert!(store.is_loading().await);

        let fresh = vec![item("a"), item("b")];
        assert!(store.finish_fetch(ticket, Some(fresh.clone())).await);
        assert!(!store.is_loading().await);
        assert_eq!(store.snapshot().await, fresh);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_items_and_clears_loading() {
        let store = Store::new();
        let kept = item("kept");
        store.prepend(kept.clone()).await;

        let ticket = store.begin_fetch().await;
        assert!(store.finish_fetch(ticket, None).await);
        assert!(!store.is_loading().await);
        assert_eq!(store.snapshot().await, vec![kept]);
    }

    #[tokio::test]
    async fn superseded_ticket_is_ignored() {
        let store = Store::new();
        let first = store.begin_fetch().await;
        let second = store.begin_fetch().await;
        assert!(second.generation() > first.generation());

        assert!(!store.finish_fetch(first, Some(vec![item("old")])).await);
        assert!(store.is_empty().await);
        assert!(store.is_loading().await);

        let newest = vec![item("new")];
        assert!(store.finish_fetch(second, Some(newest.clone())).await);
        assert_eq!(store.snapshot().await, newest);
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn prepend_and_patch_by_id() {
        let store = Store::new();
        let a = item("a");
        let b = item("b");
        store.prepend(a.clone()).await;
        store.prepend(b.clone()).await;
        assert_eq!(store.snapshot().await[0], b);

        assert!(store.patch(a.id, |it| it.label = "patched").await);
        assert_eq!(store.get(a.id).await.map(|it| it.label), Some("patched"));
        assert!(!store.patch(Uuid::new_v4(), |it| it.label = "nope").await);
        assert_eq!(store.len().await, 2);
    }
}
