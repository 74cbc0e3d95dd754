//! The data-access capability.
//!
//! [`DataSource`] is the only way the sync modules reach the hosted
//! backend. Rows travel as JSON objects; the repositories decode them into
//! typed models. Two implementations ship with this crate:
//! [`RestSource`](crate::rest::RestSource) for the real backend and
//! [`MemorySource`](crate::memory::MemorySource) for tests and demos.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A single row as exchanged with the backend.
pub type Record = Value;

/// Shared handle to a data source.
pub type SharedSource = Arc<dyn DataSource>;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors returned by any [`DataSource`] call.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the call.
    #[error("Backend error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A unique constraint rejected the write.
    #[error("Duplicate value violates unique constraint: {0}")]
    Conflict(String),

    /// A call that must yield exactly one row yielded another count.
    #[error("Expected exactly one row, got {0}")]
    NotSingle(usize),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown remote procedure: {0}")]
    UnknownFunction(String),

    #[error("Invalid data source configuration: {0}")]
    Config(String),

    #[error("Failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DataError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, DataError::Conflict(_))
    }
}

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

/// Equality predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies the predicate. Missing columns compare as null.
    pub fn matches(&self, row: &Record) -> bool {
        row.get(&self.column).unwrap_or(&Value::Null) == &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Whether a write should echo the affected rows back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returning {
    Minimal,
    Representation,
}

/// A select against one table.
///
/// ```rust
/// use feedboard_db::source::{Direction, Query};
///
/// let query = Query::table("suggestions")
///     .eq("is_public", true)
///     .order_by("created_at", Direction::Descending);
/// assert_eq!(query.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    /// `None` selects every column.
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Generic table-oriented access to the hosted backend.
///
/// Every call is one independent round trip. Implementations map a
/// unique-constraint violation to [`DataError::Conflict`].
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn select(&self, query: &Query) -> Result<Vec<Record>, DataError>;

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Record>,
        returning: Returning,
    ) -> Result<Vec<Record>, DataError>;

    async fn update(
        &self,
        table: &str,
        changes: Record,
        filters: &[Filter],
        returning: Returning,
    ) -> Result<Vec<Record>, DataError>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), DataError>;

    /// Invoke a named remote procedure with keyed arguments.
    async fn rpc(&self, function: &str, args: Record) -> Result<Value, DataError>;
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Record>) -> Result<Vec<T>, DataError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(DataError::from))
        .collect()
}

/// Decode exactly one row.
pub fn decode_single<T: DeserializeOwned>(rows: Vec<Record>) -> Result<T, DataError> {
    match decode_maybe_single(rows)? {
        Some(row) => Ok(row),
        None => Err(DataError::NotSingle(0)),
    }
}

/// Decode zero or one row; more than one is an error.
pub fn decode_maybe_single<T: DeserializeOwned>(
    mut rows: Vec<Record>,
) -> Result<Option<T>, DataError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(Some(serde_json::from_value(rows.remove(0))?)),
        n => Err(DataError::NotSingle(n)),
    }
}
