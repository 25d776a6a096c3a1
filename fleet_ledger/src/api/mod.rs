//! Fleet API: the JSON-over-HTTP boundary.
//!
//! Every handler validates its input, then runs one blocking operation on a
//! fresh SQLite connection via [`AppState::run`]. Failures are rendered by
//! [`FleetError`]'s `IntoResponse` impl as `{"error", "code"}`.

pub mod assignments;
pub mod identity;
pub mod trips;
pub mod trucks;

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use diesel::SqliteConnection;

use crate::db::connection::connect_sqlite;
use crate::error::{FleetError, FleetResult, ensure_id};

/// Source of "today" for upcoming-trip queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Wall clock in the given zone.
    System(Tz),
    /// A pinned date.
    Fixed(NaiveDate),
}

impl Clock {
    /// Current calendar date.
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System(tz) => Utc::now().with_timezone(tz).date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Shared handler state. Holds no connection; each request opens its own.
#[derive(Debug, Clone)]
pub struct AppState {
    database_url: Arc<str>,
    clock: Clock,
}

impl AppState {
    /// State for a database at `database_url`.
    pub fn new(database_url: impl Into<Arc<str>>, clock: Clock) -> Self {
        Self {
            database_url: database_url.into(),
            clock,
        }
    }

    /// Date used as the lower bound for upcoming trips.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Run `op` on the blocking pool with a freshly opened connection.
    pub async fn run<T, F>(&self, op: F) -> FleetResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> FleetResult<T> + Send + 'static,
    {
        let url = Arc::clone(&self.database_url);
        tokio::task::spawn_blocking(move || {
            let mut conn =
                connect_sqlite(&url).map_err(|e| FleetError::Storage(format!("{e:#}")))?;
            op(&mut conn)
        })
        .await?
    }
}

/// Build the fleet API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(trucks::routes())
        .merge(assignments::routes())
        .merge(trips::routes())
        .fallback(|| async { FleetError::not_found("no such endpoint") })
        .with_state(state)
}

impl From<JsonRejection> for FleetError {
    fn from(rej: JsonRejection) -> Self {
        FleetError::InvalidArgument(rej.body_text())
    }
}

impl From<QueryRejection> for FleetError {
    fn from(rej: QueryRejection) -> Self {
        FleetError::InvalidArgument(rej.body_text())
    }
}

impl From<PathRejection> for FleetError {
    fn from(rej: PathRejection) -> Self {
        FleetError::InvalidArgument(rej.body_text())
    }
}

/// A required positive id from an optional body/query field.
pub(crate) fn required_id(field: &str, value: Option<i32>) -> FleetResult<i32> {
    ensure_id(field, value.unwrap_or_default())
}

/// `{"message": ...}` success body.
pub(crate) fn message(text: &str) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "message": text }))
}
