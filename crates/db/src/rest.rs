//! PostgREST-over-HTTP implementation of [`DataSource`].
//!
//! Talks to the hosted backend's REST endpoint (`{base_url}/rest/v1`)
//! using [`reqwest`]. Equality filters become `column=eq.value` query
//! parameters, ordering becomes `order=column.desc`, and procedures are
//! invoked through `POST /rest/v1/rpc/{name}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;

use crate::source::{DataError, DataSource, Direction, Filter, Order, Query, Record, Returning};

/// Default HTTP timeout for a single call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Postgres SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Connection settings for [`RestSource`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Anonymous or service key, sent as `apikey` and bearer token.
    pub api_key: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by PostgREST on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// HTTP client for the hosted backend.
#[derive(Debug)]
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
}

impl RestSource {
    pub fn new(config: &RestConfig) -> Result<Self, DataError> {
        let invalid_key = || DataError::Config("API key is not a valid header value".into());

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|_| invalid_key())?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| invalid_key())?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{function}", self.base_url)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or the classified error.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DataError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(classify_error(status.as_u16(), &body))
    }

    async fn read_rows(
        response: reqwest::Response,
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        let response = Self::ensure_success(response).await?;
        match returning {
            Returning::Minimal => Ok(Vec::new()),
            Returning::Representation => Ok(response.json::<Vec<Record>>().await?),
        }
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn select(&self, query: &Query) -> Result<Vec<Record>, DataError> {
        tracing::debug!(table = %query.table, "REST select");
        let response = self
            .client
            .get(self.table_url(&query.table))
            .query(&select_params(query))
            .send()
            .await?;
        Self::read_rows(response, Returning::Representation).await
    }

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Record>,
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        tracing::debug!(table, rows = rows.len(), "REST insert");
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", prefer_header(returning))
            .json(&rows)
            .send()
            .await?;
        Self::read_rows(response, returning).await
    }

    async fn update(
        &self,
        table: &str,
        changes: Record,
        filters: &[Filter],
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        tracing::debug!(table, "REST update");
        let params: Vec<_> = filters.iter().map(filter_param).collect();
        let response = self
            .client
            .patch(self.table_url(table))
            .query(&params)
            .header("Prefer", prefer_header(returning))
            .json(&changes)
            .send()
            .await?;
        Self::read_rows(response, returning).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), DataError> {
        tracing::debug!(table, "REST delete");
        let params: Vec<_> = filters.iter().map(filter_param).collect();
        let response = self
            .client
            .delete(self.table_url(table))
            .query(&params)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Record) -> Result<Value, DataError> {
        tracing::debug!(function, "REST rpc");
        let response = self
            .client
            .post(self.rpc_url(function))
            .json(&args)
            .send()
            .await?;
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Query-string construction
// ---------------------------------------------------------------------------

fn filter_param(filter: &Filter) -> (String, String) {
    let operand = match &filter.value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{s}"),
        other => format!("eq.{other}"),
    };
    (filter.column.clone(), operand)
}

fn order_param(order: &Order) -> String {
    let direction = match order.direction {
        Direction::Ascending => "asc",
        Direction::Descending => "desc",
    };
    format!("{}.{direction}", order.column)
}

fn select_params(query: &Query) -> Vec<(String, String)> {
    let columns = query
        .columns
        .as_ref()
        .map(|columns| columns.join(","))
        .unwrap_or_else(|| "*".to_string());

    let mut params = vec![("select".to_string(), columns)];
    params.extend(query.filters.iter().map(filter_param));
    if let Some(order) = &query.order {
        params.push(("order".to_string(), order_param(order)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

fn prefer_header(returning: Returning) -> &'static str {
    match returning {
        Returning::Minimal => "return=minimal",
        Returning::Representation => "return=representation",
    }
}

/// Map a non-2xx response to a [`DataError`].
///
/// - SQLSTATE `23505`, or a bare 409 without a code, is a [`DataError::Conflict`].
/// - Everything else is a [`DataError::Api`] carrying the PostgREST code.
fn classify_error(status: u16, body: &str) -> DataError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone());
    let message = match parsed {
        Some(ErrorBody {
            message: Some(message),
            details: Some(details),
            ..
        }) => format!("{message} ({details})"),
        Some(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.to_string(),
    };

    let unique_violation = code.as_deref() == Some(UNIQUE_VIOLATION);
    if unique_violation || (status == 409 && code.is_none()) {
        return DataError::Conflict(message);
    }
    DataError::Api {
        status,
        code,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
