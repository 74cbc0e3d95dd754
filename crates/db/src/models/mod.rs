//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` struct matching the backend row
//! - A `Serialize` create DTO for inserts

pub mod changelog;
pub mod roadmap;
pub mod suggestion;
