use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use feedboard_core::changelog::{ContentKind, EntryKind};
use feedboard_core::roadmap::{ReactionKind, RoadmapPriority, RoadmapStatus};
use feedboard_core::suggestion::SuggestionStatus;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "feedboard")]
#[command(about = "Suggestion board, roadmap and changelog client")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggestion board
    Suggestions {
        #[command(subcommand)]
        action: SuggestionAction,
    },
    /// Public roadmap
    Roadmap {
        #[command(subcommand)]
        action: RoadmapAction,
    },
    /// Release notes
    Changelog {
        #[command(subcommand)]
        action: ChangelogAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SuggestionAction {
    /// List suggestions, newest first
    List {
        /// Include private suggestions
        #[arg(long)]
        include_private: bool,
    },
    /// Submit a suggestion
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Product area, e.g. Workspace
        #[arg(long)]
        module: String,
        /// Submitter email
        #[arg(long)]
        email: String,
        #[arg(long)]
        youtube_url: Option<String>,
        /// Hide the suggestion from the public board
        #[arg(long)]
        private: bool,
    },
    /// Move a suggestion to another status (label or slug, e.g. under-review)
    SetStatus { id: Uuid, status: SuggestionStatus },
    /// Toggle your vote on a suggestion
    Vote {
        id: Uuid,
        /// Voter email (defaults to FEEDBOARD_USER_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoadmapAction {
    /// List roadmap items with reaction tallies
    List,
    /// Add a roadmap item
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// planned, in-progress or completed
        #[arg(long)]
        status: RoadmapStatus,
        /// low, medium or high
        #[arg(long)]
        priority: RoadmapPriority,
        /// YYYY-MM-DD
        #[arg(long)]
        estimated_date: Option<NaiveDate>,
        #[arg(long)]
        product: String,
    },
    /// React to a roadmap item (likes, hearts or ideas)
    React {
        id: Uuid,
        kind: ReactionKind,
        /// Voter email (defaults to FEEDBOARD_USER_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChangelogAction {
    /// List entries, most recent release first
    List,
    /// Publish an entry
    Create {
        #[arg(long)]
        version: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// feature, improvement, bugfix or breaking
        #[arg(long)]
        kind: EntryKind,
        /// text, image, video or gif (default: text)
        #[arg(long)]
        content_type: Option<ContentKind>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        product: String,
        /// YYYY-MM-DD
        #[arg(long)]
        release_date: NaiveDate,
        /// Feature bullet; repeat for several
        #[arg(long = "feature")]
        features: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_status_slug_and_repeated_features() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::parse_from(["feedboard", "suggestions", "set-status", id.as_str(), "under-review"]);
        match cli.command {
            Command::Suggestions {
                action: SuggestionAction::SetStatus { status, .. },
            } => assert_eq!(status, SuggestionStatus::UnderReview),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from([
            "feedboard",
            "changelog",
            "create",
            "--version",
            "1.0.0",
            "--title",
            "Launch",
            "--description",
            "First release",
            "--kind",
            "feature",
            "--product",
            "Bot",
            "--release-date",
            "2024-01-01",
            "--feature",
            "Kanban",
            "--feature",
            "Search",
        ]);
        match cli.command {
            Command::Changelog {
                action:
                    ChangelogAction::Create {
                        features,
                        content_type,
                        ..
                    },
            } => {
                assert_eq!(features, ["Kanban", "Search"]);
                assert!(content_type.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn roadmap_status_uses_display_names() {
        let cli = Cli::parse_from([
            "feedboard",
            "roadmap",
            "create",
            "--title",
            "Offline",
            "--description",
            "Work offline",
            "--status",
            "in-progress",
            "--priority",
            "high",
            "--product",
            "Workspace",
        ]);
        assert!(matches!(
            cli.command,
            Command::Roadmap {
                action: RoadmapAction::Create {
                    status: RoadmapStatus::InProgress,
                    priority: RoadmapPriority::High,
                    ..
                }
            }
        ));

        assert!(Cli::try_parse_from([
            "feedboard", "roadmap", "create", "--title", "x", "--description", "y",
            "--status", "planejado", "--priority", "low", "--product", "z",
        ])
        .is_err());
    }
}
