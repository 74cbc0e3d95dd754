//! In-memory [`DataSource`] enforcing the constraints of the hosted backend.
//!
//! Tables hold JSON rows. Each table declares column defaults, required
//! columns and named unique constraints; procedures are plain closures
//! over the table set. [`MemorySource::feedback`] installs the full
//! feedback schema, including both vote-counter procedures.
//!
//! Failures can be injected per `(operation, table-or-procedure)` so that
//! callers can exercise their error paths.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use feedboard_core::suggestion::SuggestionStatus;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::schema::{
    CHANGELOG_ENTRIES, CREATED_AT, DECREMENT_SUGGESTION_VOTES, ID, INCREMENT_SUGGESTION_VOTES,
    REQUIRED_COLUMNS, ROADMAP_ITEMS, ROADMAP_REACTIONS, SUGGESTIONS, SUGGESTION_ID_ARG,
    SUGGESTION_VOTES, UNIQUE_CONSTRAINTS, UPDATED_AT,
};
use crate::source::{DataError, DataSource, Direction, Filter, Query, Record, Returning};

/// Postgres SQLSTATE for a not-null violation.
const NOT_NULL_VIOLATION: &str = "23502";

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

/// Value filled in when an insert omits a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// Fresh v4 UUID.
    GeneratedId,
    /// Current time; strictly increasing across the source.
    Now,
    /// Current UTC date as `YYYY-MM-DD`.
    Today,
    Literal(Value),
}

/// Shape and constraints of one table.
#[derive(Debug, Clone, Default)]
pub struct TableSpec {
    defaults: Vec<(String, ColumnDefault)>,
    required: Vec<String>,
    unique: Vec<(String, Vec<String>)>,
}

impl TableSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_value(mut self, column: &str, default: ColumnDefault) -> Self {
        self.defaults.push((column.to_string(), default));
        self
    }

    pub fn literal(self, column: &str, value: Value) -> Self {
        self.default_value(column, ColumnDefault::Literal(value))
    }

    /// `id` plus `created_at`.
    pub fn with_identity(self) -> Self {
        self.default_value(ID, ColumnDefault::GeneratedId)
            .default_value(CREATED_AT, ColumnDefault::Now)
    }

    /// `id`, `created_at` and an `updated_at` refreshed on every update.
    pub fn with_timestamps(self) -> Self {
        self.with_identity()
            .default_value(UPDATED_AT, ColumnDefault::Now)
    }

    pub fn required(mut self, columns: &[&str]) -> Self {
        self.required.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn unique(mut self, name: &str, columns: &[&str]) -> Self {
        self.unique.push((
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    fn tracks_updates(&self) -> bool {
        self.defaults.iter().any(|(column, _)| column == UPDATED_AT)
    }
}

struct Table {
    spec: TableSpec,
    rows: Vec<Record>,
}

/// All tables of a [`MemorySource`], as seen by procedures.
#[derive(Default)]
pub struct TableSet {
    tables: HashMap<String, Table>,
}

impl TableSet {
    fn table(&self, name: &str) -> Result<&Table, DataError> {
        self.tables
            .get(name)
            .ok_or_else(|| DataError::UnknownTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, DataError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DataError::UnknownTable(name.to_string()))
    }

    pub fn rows_mut(&mut self, name: &str) -> Result<&mut Vec<Record>, DataError> {
        Ok(&mut self.table_mut(name)?.rows)
    }
}

type Procedure = Box<dyn Fn(&mut TableSet, &Value) -> Result<Value, DataError> + Send + Sync>;

/// Operation kinds that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    Rpc,
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

#[derive(Default)]
struct State {
    tables: TableSet,
    procedures: HashMap<String, Procedure>,
    failures: HashSet<(Operation, String)>,
    last_now: Option<DateTime<Utc>>,
}

impl State {
    fn check_failure(&self, operation: Operation, target: &str) -> Result<(), DataError> {
        if self.failures.contains(&(operation, target.to_string())) {
            return Err(DataError::Api {
                status: 503,
                code: None,
                message: format!("injected {operation:?} failure on {target}"),
            });
        }
        Ok(())
    }

    /// Current time, nudged forward so no two calls return the same instant.
    fn next_now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_now {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_now = Some(now);
        now
    }

    fn now_value(&mut self) -> Value {
        Value::String(self.next_now().to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    fn resolve_default(&mut self, default: &ColumnDefault) -> Value {
        match default {
            ColumnDefault::GeneratedId => Value::String(Uuid::new_v4().to_string()),
            ColumnDefault::Now => self.now_value(),
            ColumnDefault::Today => Value::String(Utc::now().date_naive().to_string()),
            ColumnDefault::Literal(value) => value.clone(),
        }
    }
}

/// In-process stand-in for the hosted backend.
#[derive(Default)]
pub struct MemorySource {
    state: RwLock<State>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, spec: TableSpec) -> Self {
        self.state.get_mut().tables.tables.insert(
            name.to_string(),
            Table {
                spec,
                rows: Vec::new(),
            },
        );
        self
    }

    pub fn with_procedure<F>(mut self, name: &str, procedure: F) -> Self
    where
        F: Fn(&mut TableSet, &Value) -> Result<Value, DataError> + Send + Sync + 'static,
    {
        self.state
            .get_mut()
            .procedures
            .insert(name.to_string(), Box::new(procedure));
        self
    }

    /// The five feedback tables and the two vote-counter procedures.
    pub fn feedback() -> Self {
        let constrained = |table: &str, mut spec: TableSpec| {
            for (name, columns) in REQUIRED_COLUMNS {
                if *name == table {
                    spec = spec.required(columns);
                }
            }
            for (name, constraint, columns) in UNIQUE_CONSTRAINTS {
                if *name == table {
                    spec = spec.unique(constraint, columns);
                }
            }
            spec
        };

        let suggestions = TableSpec::new()
            .with_timestamps()
            .literal("youtube_url", Value::Null)
            .literal("is_public", json!(true))
            .literal("status", json!(SuggestionStatus::default().label()))
            .literal("priority", json!("media"))
            .literal("votes", json!(0))
            .literal("comments_count", json!(0))
            .literal("admin_response", Value::Null)
            .literal("is_pinned", json!(false));

        let roadmap_items = TableSpec::new()
            .with_timestamps()
            .literal("status", json!("planejado"))
            .literal("priority", json!("media"))
            .literal("estimated_date", Value::Null)
            .literal("start_date", Value::Null)
            .literal("end_date", Value::Null)
            .literal("votes", json!(0));

        let changelog_entries = TableSpec::new()
            .with_timestamps()
            .literal("content_type", json!("text"))
            .literal("content", Value::Null)
            .literal("image_url", Value::Null)
            .literal("video_url", Value::Null)
            .default_value("release_date", ColumnDefault::Today)
            .literal("features", json!([]));

        Self::new()
            .with_table(SUGGESTIONS, constrained(SUGGESTIONS, suggestions))
            .with_table(
                SUGGESTION_VOTES,
                constrained(SUGGESTION_VOTES, TableSpec::new().with_identity()),
            )
            .with_table(ROADMAP_ITEMS, constrained(ROADMAP_ITEMS, roadmap_items))
            .with_table(
                ROADMAP_REACTIONS,
                constrained(ROADMAP_REACTIONS, TableSpec::new().with_identity()),
            )
            .with_table(
                CHANGELOG_ENTRIES,
                constrained(CHANGELOG_ENTRIES, changelog_entries),
            )
            .with_procedure(INCREMENT_SUGGESTION_VOTES, adjust_votes(1))
            .with_procedure(DECREMENT_SUGGESTION_VOTES, adjust_votes(-1))
    }

    /// Make every future `operation` on `target` fail until [`recover`](Self::recover).
    pub async fn fail(&self, operation: Operation, target: &str) {
        self.state
            .write()
            .await
            .failures
            .insert((operation, target.to_string()));
    }

    pub async fn recover(&self, operation: Operation, target: &str) {
        self.state
            .write()
            .await
            .failures
            .remove(&(operation, target.to_string()));
    }

    /// Raw rows of `table` in insertion order; empty for unknown tables.
    pub async fn rows(&self, table: &str) -> Vec<Record> {
        self.state
            .read()
            .await
            .tables
            .table(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn select(&self, query: &Query) -> Result<Vec<Record>, DataError> {
        let state = self.state.read().await;
        state.check_failure(Operation::Select, &query.table)?;
        let table = state.tables.table(&query.table)?;

        let mut rows: Vec<Record> = table
            .rows
            .iter()
            .filter(|row| query.filters.iter().all(|f| f.matches(row)))
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(&order.column).unwrap_or(&Value::Null),
                    b.get(&order.column).unwrap_or(&Value::Null),
                );
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        if let Some(columns) = &query.columns {
            rows = rows
                .into_iter()
                .map(|row| project(row, columns))
                .collect();
        }

        Ok(rows)
    }

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Record>,
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        let mut state = self.state.write().await;
        state.check_failure(Operation::Insert, table)?;
        let spec = state.tables.table(table)?.spec.clone();

        let mut prepared: Vec<Record> = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(DataError::Api {
                    status: 400,
                    code: None,
                    message: format!("rows inserted into {table} must be JSON objects"),
                });
            };

            for (column, default) in &spec.defaults {
                if !fields.contains_key(column) {
                    let value = state.resolve_default(default);
                    fields.insert(column.clone(), value);
                }
            }

            for column in &spec.required {
                if fields.get(column).map_or(true, Value::is_null) {
                    return Err(DataError::Api {
                        status: 400,
                        code: Some(NOT_NULL_VIOLATION.to_string()),
                        message: format!(
                            "null value in column \"{column}\" of relation \"{table}\" violates not-null constraint"
                        ),
                    });
                }
            }

            let existing = &state.tables.table(table)?.rows;
            for (constraint, columns) in &spec.unique {
                let key = unique_key(&fields, columns);
                let clash = existing
                    .iter()
                    .chain(prepared.iter())
                    .filter_map(Value::as_object)
                    .any(|other| unique_key(other, columns) == key);
                if clash {
                    return Err(DataError::Conflict(format!(
                        "duplicate key value violates unique constraint \"{constraint}\""
                    )));
                }
            }

            prepared.push(Value::Object(fields));
        }

        state.tables.rows_mut(table)?.extend(prepared.iter().cloned());

        Ok(match returning {
            Returning::Minimal => Vec::new(),
            Returning::Representation => prepared,
        })
    }

    async fn update(
        &self,
        table: &str,
        changes: Record,
        filters: &[Filter],
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        let mut state = self.state.write().await;
        state.check_failure(Operation::Update, table)?;

        let Value::Object(changes) = changes else {
            return Err(DataError::Api {
                status: 400,
                code: None,
                message: format!("changes applied to {table} must be a JSON object"),
            });
        };
        let touch = state.tables.table(table)?.spec.tracks_updates();
        let now = state.now_value();

        let mut updated = Vec::new();
        for row in state.tables.rows_mut(table)?.iter_mut() {
            if !filters.iter().all(|f| f.matches(row)) {
                continue;
            }
            if let Value::Object(fields) = row {
                for (column, value) in &changes {
                    fields.insert(column.clone(), value.clone());
                }
                if touch {
                    fields.insert(UPDATED_AT.to_string(), now.clone());
                }
            }
            updated.push(row.clone());
        }

        Ok(match returning {
            Returning::Minimal => Vec::new(),
            Returning::Representation => updated,
        })
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), DataError> {
        let mut state = self.state.write().await;
        state.check_failure(Operation::Delete, table)?;
        state
            .tables
            .rows_mut(table)?
            .retain(|row| !filters.iter().all(|f| f.matches(row)));
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Record) -> Result<Value, DataError> {
        let mut state = self.state.write().await;
        state.check_failure(Operation::Rpc, function)?;
        let State {
            tables, procedures, ..
        } = &mut *state;
        let procedure = procedures
            .get(function)
            .ok_or_else(|| DataError::UnknownFunction(function.to_string()))?;
        procedure(tables, &args)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Procedure body shared by the increment/decrement vote counters.
///
/// Votes never drop below zero. An unknown suggestion id is a no-op.
fn adjust_votes(delta: i64) -> impl Fn(&mut TableSet, &Value) -> Result<Value, DataError> {
    move |tables: &mut TableSet, args: &Value| {
        let id = args
            .get(SUGGESTION_ID_ARG)
            .cloned()
            .ok_or_else(|| DataError::Api {
                status: 400,
                code: None,
                message: format!("missing argument {SUGGESTION_ID_ARG}"),
            })?;

        for row in tables.rows_mut(SUGGESTIONS)?.iter_mut() {
            if row.get(ID) != Some(&id) {
                continue;
            }
            let votes = row.get("votes").and_then(Value::as_i64).unwrap_or(0);
            row["votes"] = json!((votes + delta).max(0));
        }
        Ok(Value::Null)
    }
}

fn unique_key(fields: &Map<String, Value>, columns: &[String]) -> Vec<Value> {
    columns
        .iter()
        .map(|c| fields.get(c).cloned().unwrap_or(Value::Null))
        .collect()
}

fn project(row: Record, columns: &[String]) -> Record {
    match row {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(key, _)| columns.contains(key))
                .collect(),
        ),
        other => other,
    }
}

/// Ordering used by `select`: numbers numerically, RFC 3339 timestamps
/// chronologically, other strings lexically. Nulls sort last ascending.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
