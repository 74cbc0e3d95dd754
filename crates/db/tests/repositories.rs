//! Integration tests for the repository layer.
//!
//! Exercises every repository against the in-memory feedback schema:
//! - Backend defaults on create
//! - Visibility filter and newest-first ordering
//! - Unique constraints surfacing as conflicts
//! - Vote counter procedures

use assert_matches::assert_matches;
use chrono::NaiveDate;
use feedboard_core::changelog::{ContentKind, EntryKind};
use feedboard_core::roadmap::{ReactionKind, RoadmapPriority, RoadmapStatus};
use feedboard_core::suggestion::SuggestionStatus;
use feedboard_db::models::changelog::CreateChangelogEntry;
use feedboard_db::models::roadmap::{tally_reactions, CreateRoadmapItem};
use feedboard_db::models::suggestion::CreateSuggestion;
use feedboard_db::repositories::{
    ChangelogRepo, RoadmapReactionRepo, RoadmapRepo, SuggestionRepo, SuggestionVoteRepo,
};
use feedboard_db::schema::{ROADMAP_REACTIONS, SUGGESTION_VOTES};
use feedboard_db::{DataError, MemorySource};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_suggestion(title: &str, is_public: bool) -> CreateSuggestion {
    CreateSuggestion {
        title: title.to_string(),
        description: "Reduce eye strain at night".to_string(),
        module: "Workspace".to_string(),
        email: "a@b.com".to_string(),
        youtube_url: None,
        is_public,
    }
}

fn new_roadmap_item(title: &str, status: RoadmapStatus) -> CreateRoadmapItem {
    CreateRoadmapItem {
        title: title.to_string(),
        description: "Planned work".to_string(),
        status,
        priority: RoadmapPriority::High,
        estimated_date: NaiveDate::from_ymd_opt(2025, 6, 30),
        product: "Workspace".to_string(),
    }
}

fn new_changelog(version: &str, release_date: NaiveDate) -> CreateChangelogEntry {
    CreateChangelogEntry {
        version: version.to_string(),
        title: format!("Release {version}"),
        description: "Assorted fixes".to_string(),
        kind: EntryKind::Improvement,
        content_type: None,
        content: None,
        image_url: None,
        video_url: None,
        product: "Bot".to_string(),
        release_date,
        features: vec!["Faster sync".to_string(), "Smaller bundle".to_string()],
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_suggestion_applies_backend_defaults() {
    let source = MemorySource::feedback();

    let created = SuggestionRepo::create(&source, &new_suggestion("Add dark mode", true))
        .await
        .unwrap();

    assert_eq!(created.title, "Add dark mode");
    assert_eq!(created.status, SuggestionStatus::Received);
    assert_eq!(created.priority, "media");
    assert_eq!(created.votes, 0);
    assert_eq!(created.comments_count, 0);
    assert!(!created.is_pinned);
    assert!(created.admin_response.is_none());
}

#[tokio::test]
async fn list_suggestions_respects_visibility_and_order() {
    let source = MemorySource::feedback();
    SuggestionRepo::create(&source, &new_suggestion("older", true))
        .await
        .unwrap();
    SuggestionRepo::create(&source, &new_suggestion("private", false))
        .await
        .unwrap();
    SuggestionRepo::create(&source, &new_suggestion("newer", true))
        .await
        .unwrap();

    let public = SuggestionRepo::list(&source, false).await.unwrap();
    let titles: Vec<_> = public.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["newer", "older"]);

    let all = SuggestionRepo::list(&source, true).await.unwrap();
    let titles: Vec<_> = all.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["newer", "private", "older"]);
}

#[tokio::test]
async fn update_status_changes_only_status() {
    let source = MemorySource::feedback();
    let created = SuggestionRepo::create(&source, &new_suggestion("Export CSV", true))
        .await
        .unwrap();

    let updated = SuggestionRepo::update_status(&source, created.id, SuggestionStatus::InDevelopment)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, SuggestionStatus::InDevelopment);
    assert_eq!(updated.title, created.title);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_status_of_missing_suggestion_is_not_single() {
    let source = MemorySource::feedback();
    let result =
        SuggestionRepo::update_status(&source, Uuid::new_v4(), SuggestionStatus::Rejected).await;
    assert_matches!(result, Err(DataError::NotSingle(0)));
}

#[tokio::test]
async fn vote_records_are_unique_per_voter() {
    let source = MemorySource::feedback();
    let suggestion = SuggestionRepo::create(&source, &new_suggestion("Shortcuts", true))
        .await
        .unwrap();

    SuggestionVoteRepo::insert(&source, suggestion.id, "a@b.com")
        .await
        .unwrap();
    SuggestionVoteRepo::insert(&source, suggestion.id, "c@d.com")
        .await
        .unwrap();
    let duplicate = SuggestionVoteRepo::insert(&source, suggestion.id, "a@b.com").await;
    assert_matches!(duplicate, Err(DataError::Conflict(_)));

    let found = SuggestionVoteRepo::find(&source, suggestion.id, "a@b.com")
        .await
        .unwrap()
        .expect("vote should exist");
    assert_eq!(found.suggestion_id, suggestion.id);

    SuggestionVoteRepo::delete(&source, suggestion.id, "a@b.com")
        .await
        .unwrap();
    assert!(SuggestionVoteRepo::find(&source, suggestion.id, "a@b.com")
        .await
        .unwrap()
        .is_none());
    assert_eq!(source.rows(SUGGESTION_VOTES).await.len(), 1);
}

#[tokio::test]
async fn vote_counter_procedures_round_trip() {
    let source = MemorySource::feedback();
    let suggestion = SuggestionRepo::create(&source, &new_suggestion("Webhooks", true))
        .await
        .unwrap();

    SuggestionRepo::increment_votes(&source, suggestion.id)
        .await
        .unwrap();
    let after_up = SuggestionRepo::list(&source, false).await.unwrap();
    assert_eq!(after_up[0].votes, 1);

    SuggestionRepo::decrement_votes(&source, suggestion.id)
        .await
        .unwrap();
    SuggestionRepo::decrement_votes(&source, suggestion.id)
        .await
        .unwrap();
    let after_down = SuggestionRepo::list(&source, false).await.unwrap();
    assert_eq!(after_down[0].votes, 0);
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roadmap_rows_are_stored_in_storage_alphabet() {
    let source = MemorySource::feedback();
    let input = new_roadmap_item("Offline mode", RoadmapStatus::InProgress);

    let row = RoadmapRepo::create(&source, &input.to_row()).await.unwrap();
    assert_eq!(row.status, "em-desenvolvimento");
    assert_eq!(row.priority, "alta");
    assert_eq!(row.estimated_date, Some(date(2025, 6, 30)));
    assert_eq!(row.votes, 0);

    let listed = RoadmapRepo::list(&source).await.unwrap();
    assert_eq!(listed, vec![row]);
}

#[tokio::test]
async fn roadmap_list_is_newest_first() {
    let source = MemorySource::feedback();
    for title in ["first", "second", "third"] {
        RoadmapRepo::create(
            &source,
            &new_roadmap_item(title, RoadmapStatus::Planned).to_row(),
        )
        .await
        .unwrap();
    }

    let titles: Vec<_> = RoadmapRepo::list(&source)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.title)
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn reactions_are_unique_per_item_voter_and_kind() {
    let source = MemorySource::feedback();
    let item = RoadmapRepo::create(
        &source,
        &new_roadmap_item("Calendar sync", RoadmapStatus::Planned).to_row(),
    )
    .await
    .unwrap();

    RoadmapReactionRepo::insert(&source, item.id, "a@b.com", ReactionKind::Likes)
        .await
        .unwrap();
    RoadmapReactionRepo::insert(&source, item.id, "a@b.com", ReactionKind::Hearts)
        .await
        .unwrap();
    let duplicate =
        RoadmapReactionRepo::insert(&source, item.id, "a@b.com", ReactionKind::Likes).await;
    assert!(duplicate.unwrap_err().is_conflict());
    assert_eq!(source.rows(ROADMAP_REACTIONS).await.len(), 2);

    let found = RoadmapReactionRepo::find(&source, item.id, "a@b.com", ReactionKind::Hearts)
        .await
        .unwrap();
    assert_eq!(found.map(|r| r.reaction_type), Some(ReactionKind::Hearts));

    let all = RoadmapReactionRepo::list_all(&source).await.unwrap();
    let tallies = tally_reactions(&all);
    assert_eq!(tallies[&item.id].likes, 1);
    assert_eq!(tallies[&item.id].hearts, 1);
    assert_eq!(tallies[&item.id].ideas, 0);
}

// ---------------------------------------------------------------------------
// Changelog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn changelog_create_defaults_content_type_to_text() {
    let source = MemorySource::feedback();

    let entry = ChangelogRepo::create(&source, &new_changelog("2.0.0", date(2024, 5, 1)))
        .await
        .unwrap();

    assert_eq!(entry.content_type, ContentKind::Text);
    assert_eq!(entry.kind, EntryKind::Improvement);
    assert_eq!(entry.features, ["Faster sync", "Smaller bundle"]);
    assert!(entry.payload().is_none());
}

#[tokio::test]
async fn changelog_list_orders_by_release_date() {
    let source = MemorySource::feedback();
    ChangelogRepo::create(&source, &new_changelog("1.1.0", date(2024, 2, 1)))
        .await
        .unwrap();
    ChangelogRepo::create(&source, &new_changelog("1.3.0", date(2024, 4, 1)))
        .await
        .unwrap();
    ChangelogRepo::create(&source, &new_changelog("1.2.0", date(2024, 3, 1)))
        .await
        .unwrap();

    let versions: Vec<_> = ChangelogRepo::list(&source)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.version)
        .collect();
    assert_eq!(versions, ["1.3.0", "1.2.0", "1.1.0"]);
}

