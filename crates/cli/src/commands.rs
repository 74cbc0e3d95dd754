//! Subcommand execution. Every command yields a JSON value for printing.

use anyhow::{bail, Context};
use feedboard_db::models::changelog::CreateChangelogEntry;
use feedboard_db::models::roadmap::CreateRoadmapItem;
use feedboard_db::models::suggestion::CreateSuggestion;
use feedboard_db::SharedSource;
use feedboard_events::SharedNotifier;
use feedboard_sync::{ChangelogFeed, ReactionOutcome, RoadmapBoard, SuggestionBoard, VoteChange};
use serde_json::{json, Value};

use crate::cli::{ChangelogAction, Command, RoadmapAction, SuggestionAction};
use crate::config::CliConfig;

pub async fn run(
    command: Command,
    config: &CliConfig,
    source: SharedSource,
    notifier: SharedNotifier,
) -> anyhow::Result<Value> {
    match command {
        Command::Suggestions { action } => {
            suggestions(action, config, SuggestionBoard::new(source, notifier)).await
        }
        Command::Roadmap { action } => {
            roadmap(action, config, RoadmapBoard::new(source, notifier)).await
        }
        Command::Changelog { action } => {
            changelog(action, ChangelogFeed::new(source, notifier)).await
        }
    }
}

async fn suggestions(
    action: SuggestionAction,
    config: &CliConfig,
    board: SuggestionBoard,
) -> anyhow::Result<Value> {
    match action {
        SuggestionAction::List { include_private } => {
            Ok(serde_json::to_value(board.fetch(include_private).await)?)
        }
        SuggestionAction::Create {
            title,
            description,
            module,
            email,
            youtube_url,
            private,
        } => {
            let input = CreateSuggestion {
                title,
                description,
                module,
                email,
                youtube_url,
                is_public: !private,
            };
            Ok(serde_json::to_value(board.create(&input).await?)?)
        }
        SuggestionAction::SetStatus { id, status } => {
            Ok(serde_json::to_value(board.update_status(id, status).await?)?)
        }
        SuggestionAction::Vote { id, email } => {
            let email = config.voter_email(email)?;
            let Some(change) = board.vote(id, &email).await else {
                bail!("vote on suggestion {id} was not recorded");
            };
            let votes = board.get(id).await.map(|s| s.votes);
            Ok(json!({
                "suggestion_id": id,
                "voted": change == VoteChange::Added,
                "votes": votes,
            }))
        }
    }
}

async fn roadmap(
    action: RoadmapAction,
    config: &CliConfig,
    board: RoadmapBoard,
) -> anyhow::Result<Value> {
    match action {
        RoadmapAction::List => Ok(serde_json::to_value(board.fetch().await)?),
        RoadmapAction::Create {
            title,
            description,
            status,
            priority,
            estimated_date,
            product,
        } => {
            let input = CreateRoadmapItem {
                title,
                description,
                status,
                priority,
                estimated_date,
                product,
            };
            Ok(serde_json::to_value(board.create(&input).await?)?)
        }
        RoadmapAction::React { id, kind, email } => {
            let email = config.voter_email(email)?;
            // Load first so the reply carries the item's current tally.
            board.fetch().await;
            let outcome = board
                .add_reaction(id, kind, &email)
                .await
                .with_context(|| format!("reaction on roadmap item {id} was not recorded"))?;
            let reactions = board.get(id).await.map(|item| item.reactions);
            Ok(json!({
                "roadmap_item_id": id,
                "reaction": kind,
                "recorded": outcome == ReactionOutcome::Recorded,
                "reactions": reactions,
            }))
        }
    }
}

async fn changelog(action: ChangelogAction, feed: ChangelogFeed) -> anyhow::Result<Value> {
    match action {
        ChangelogAction::List => Ok(serde_json::to_value(feed.fetch().await)?),
        ChangelogAction::Create {
            version,
            title,
            description,
            kind,
            content_type,
            content,
            image_url,
            video_url,
            product,
            release_date,
            features,
        } => {
            let input = CreateChangelogEntry {
                version,
                title,
                description,
                kind,
                content_type,
                content,
                image_url,
                video_url,
                product,
                release_date,
                features,
            };
            Ok(serde_json::to_value(feed.create(&input).await?)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use feedboard_db::MemorySource;
    use feedboard_events::LogNotifier;

    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn config() -> CliConfig {
        CliConfig {
            api_url: "https://db.example.com".to_string(),
            api_key: "anon-key".to_string(),
            request_timeout_secs: 30,
            user_email: Some("me@b.com".to_string()),
        }
    }

    async fn exec(source: &SharedSource, args: &[&str]) -> anyhow::Result<Value> {
        let cli = Cli::try_parse_from(std::iter::once("feedboard").chain(args.iter().copied()))?;
        run(cli.command, &config(), source.clone(), Arc::new(LogNotifier)).await
    }

    #[tokio::test]
    async fn create_vote_and_list_suggestions() {
        let source: SharedSource = Arc::new(MemorySource::feedback());

        let created = exec(
            &source,
            &[
                "suggestions", "create", "--title", "Add dark mode", "--description",
                "Night theme", "--module", "Workspace", "--email", "a@b.com",
            ],
        )
        .await
        .unwrap();
        assert_eq!(created["status"], "Recebido");
        let id = created["id"].as_str().unwrap().to_string();

        let voted = exec(&source, &["suggestions", "vote", id.as_str()]).await.unwrap();
        assert_eq!(voted["voted"], true);
        assert_eq!(voted["votes"], 1);

        let listed = exec(&source, &["suggestions", "list"]).await.unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["votes"], 1);
    }

    #[tokio::test]
    async fn react_reports_tally() {
        let source: SharedSource = Arc::new(MemorySource::feedback());
        let created = exec(
            &source,
            &[
                "roadmap", "create", "--title", "Offline", "--description", "Work offline",
                "--status", "in-progress", "--priority", "high", "--product", "Workspace",
            ],
        )
        .await
        .unwrap();
        assert_eq!(created["status"], "in-progress");
        let id = created["id"].as_str().unwrap().to_string();

        let first = exec(&source, &["roadmap", "react", id.as_str(), "likes"]).await.unwrap();
        assert_eq!(first["recorded"], true);
        assert_eq!(first["reactions"]["likes"], 1);

        let again = exec(&source, &["roadmap", "react", id.as_str(), "likes"]).await.unwrap();
        assert_eq!(again["recorded"], false);
        assert_eq!(again["reactions"]["likes"], 1);
    }

    #[tokio::test]
    async fn changelog_create_then_list() {
        let source: SharedSource = Arc::new(MemorySource::feedback());
        exec(
            &source,
            &[
                "changelog", "create", "--version", "1.0.0", "--title", "Launch",
                "--description", "First release", "--kind", "feature", "--product", "Bot",
                "--release-date", "2024-01-01", "--feature", "Kanban",
            ],
        )
        .await
        .unwrap();

        let listed = exec(&source, &["changelog", "list"]).await.unwrap();
        assert_eq!(listed[0]["version"], "1.0.0");
        assert_eq!(listed[0]["content_type"], "text");
        assert_eq!(listed[0]["features"][0], "Kanban");
    }
}
