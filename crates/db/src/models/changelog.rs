//! Changelog entry rows.

use chrono::NaiveDate;
use feedboard_core::changelog::{ContentKind, EntryKind};
use feedboard_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `changelog_entries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub id: EntityId,
    pub version: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content_type: ContentKind,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub product: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ChangelogEntry {
    /// Payload reference matching `content_type`, if one was stored.
    pub fn payload(&self) -> Option<&str> {
        match self.content_type {
            ContentKind::Text => self.content.as_deref(),
            ContentKind::Image | ContentKind::Gif => self.image_url.as_deref(),
            ContentKind::Video => self.video_url.as_deref(),
        }
    }
}

/// DTO for publishing a changelog entry.
///
/// `content_type` left as `None` is stored as `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChangelogEntry {
    pub version: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub product: String,
    pub release_date: NaiveDate,
    pub features: Vec<String>,
}
