//! Client-side synchronization for the suggestion board, roadmap and
//! changelog.
//!
//! Each module owns a [`Store`] mirroring one remote collection, reaches
//! the backend only through a [`DataSource`](feedboard_db::DataSource) and
//! reports every mutation outcome through a
//! [`Notifier`](feedboard_events::Notifier).

pub mod changelog;
pub mod error;
mod messages;
pub mod roadmap;
pub mod store;
pub mod suggestions;

pub use changelog::ChangelogFeed;
pub use error::{SyncError, SyncResult};
pub use roadmap::{ReactionOutcome, RoadmapBoard};
pub use store::{FetchTicket, Keyed, Store};
pub use suggestions::{SuggestionBoard, VoteChange};
