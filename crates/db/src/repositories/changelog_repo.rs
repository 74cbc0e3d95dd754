//! Repository for the `changelog_entries` table.

use crate::models::changelog::{ChangelogEntry, CreateChangelogEntry};
use crate::schema::CHANGELOG_ENTRIES;
use crate::source::{decode_rows, decode_single, DataError, DataSource, Direction, Query, Returning};

/// Provides list/create operations for changelog entries.
pub struct ChangelogRepo;

impl ChangelogRepo {
    /// List entries by release date, most recent first.
    pub async fn list(source: &dyn DataSource) -> Result<Vec<ChangelogEntry>, DataError> {
        let query =
            Query::table(CHANGELOG_ENTRIES).order_by("release_date", Direction::Descending);
        decode_rows(source.select(&query).await?)
    }

    /// Publish an entry, returning the stored row.
    pub async fn create(
        source: &dyn DataSource,
        input: &CreateChangelogEntry,
    ) -> Result<ChangelogEntry, DataError> {
        let rows = source
            .insert(
                CHANGELOG_ENTRIES,
                vec![serde_json::to_value(input)?],
                Returning::Representation,
            )
            .await?;
        decode_single(rows)
    }
}
