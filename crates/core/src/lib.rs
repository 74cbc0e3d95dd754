//! Shared vocabulary for the feedback board, roadmap and changelog.
//!
//! Everything here is pure: identifier and timestamp aliases, the
//! [`error::CoreError`] type, and the fixed value sets persisted by the
//! hosted backend.

pub mod changelog;
pub mod error;
pub mod roadmap;
pub mod suggestion;
pub mod types;
