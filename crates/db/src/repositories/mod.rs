//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations
//! that accept `&dyn DataSource` as the first argument.

pub mod changelog_repo;
pub mod roadmap_reaction_repo;
pub mod roadmap_repo;
pub mod suggestion_repo;
pub mod suggestion_vote_repo;

pub use changelog_repo::ChangelogRepo;
pub use roadmap_reaction_repo::RoadmapReactionRepo;
pub use roadmap_repo::RoadmapRepo;
pub use suggestion_repo::SuggestionRepo;
pub use suggestion_vote_repo::SuggestionVoteRepo;
