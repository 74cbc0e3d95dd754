//! Table, column and procedure names of the hosted backend.
//!
//! Mirrors `migrations/0001_feedback_schema.sql`.

pub const SUGGESTIONS: &str = "suggestions";
pub const SUGGESTION_VOTES: &str = "suggestion_votes";
pub const ROADMAP_ITEMS: &str = "roadmap_items";
pub const ROADMAP_REACTIONS: &str = "roadmap_reactions";
pub const CHANGELOG_ENTRIES: &str = "changelog_entries";

pub const INCREMENT_SUGGESTION_VOTES: &str = "increment_suggestion_votes";
pub const DECREMENT_SUGGESTION_VOTES: &str = "decrement_suggestion_votes";

/// Argument name shared by both vote-counter procedures.
pub const SUGGESTION_ID_ARG: &str = "suggestion_id";

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Unique constraints: `(table, constraint name, columns)`.
pub const UNIQUE_CONSTRAINTS: &[(&str, &str, &[&str])] = &[
    (
        SUGGESTION_VOTES,
        "uq_suggestion_votes_suggestion_user",
        &["suggestion_id", "user_email"],
    ),
    (
        ROADMAP_REACTIONS,
        "uq_roadmap_reactions_item_user_type",
        &["roadmap_item_id", "user_email", "reaction_type"],
    ),
];

/// Columns without a default that every insert must supply.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (SUGGESTIONS, &["title", "description", "module", "email"]),
    (SUGGESTION_VOTES, &["suggestion_id", "user_email"]),
    (ROADMAP_ITEMS, &["title", "description", "product"]),
    (
        ROADMAP_REACTIONS,
        &["roadmap_item_id", "user_email", "reaction_type"],
    ),
    (
        CHANGELOG_ENTRIES,
        &["version", "title", "description", "type", "product"],
    ),
];
