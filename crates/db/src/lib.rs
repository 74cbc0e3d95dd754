//! Data access for the feedback board.
//!
//! - [`source`] — the [`DataSource`] capability and query types.
//! - [`rest`] — PostgREST implementation over HTTP.
//! - [`memory`] — in-process implementation with backend constraints.
//! - [`models`] / [`repositories`] — typed rows and per-table operations.

pub mod memory;
pub mod models;
pub mod repositories;
pub mod rest;
pub mod schema;
pub mod source;

pub use memory::MemorySource;
pub use rest::{RestConfig, RestSource};
pub use source::{DataError, DataSource, SharedSource};
