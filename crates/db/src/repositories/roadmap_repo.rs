//! Repository for the `roadmap_items` table.

use crate::models::roadmap::{NewRoadmapItem, RoadmapItemRow};
use crate::schema::{CREATED_AT, ROADMAP_ITEMS};
use crate::source::{decode_rows, decode_single, DataError, DataSource, Direction, Query, Returning};

/// Provides list/create operations for roadmap items.
///
/// Rows stay in the storage alphabet; mapping to the display alphabet is
/// the caller's concern.
pub struct RoadmapRepo;

impl RoadmapRepo {
    /// List every roadmap item newest-first.
    pub async fn list(source: &dyn DataSource) -> Result<Vec<RoadmapItemRow>, DataError> {
        let query = Query::table(ROADMAP_ITEMS).order_by(CREATED_AT, Direction::Descending);
        decode_rows(source.select(&query).await?)
    }

    /// Create a roadmap item, returning the stored row.
    pub async fn create(
        source: &dyn DataSource,
        input: &NewRoadmapItem,
    ) -> Result<RoadmapItemRow, DataError> {
        let rows = source
            .insert(
                ROADMAP_ITEMS,
                vec![serde_json::to_value(input)?],
                Returning::Representation,
            )
            .await?;
        decode_single(rows)
    }
}
