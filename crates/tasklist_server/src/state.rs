//! Shared application state.
//!
//! # Invariants
//! - The SQLite connection is owned here for the process lifetime.
//! - Store calls run on the blocking pool, one at a time per connection.

use crate::error::ApiErrorResponse;
use log::error;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tasklist_core::{SqliteTaskRepository, TaskService, TaskServiceError};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an opened, migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service call against the store on the blocking pool.
    ///
    /// # Errors
    /// - Service errors are mapped through `ApiErrorResponse::from`.
    /// - A poisoned lock or a panicked worker yields 500.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, ApiErrorResponse>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&TaskService<SqliteTaskRepository<'c>>) -> Result<T, TaskServiceError>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| {
                error!("event=store_lock module=server status=error error_code=lock_poisoned");
                ApiErrorResponse::internal_error()
            })?;
            let service = TaskService::new(SqliteTaskRepository::new(&guard));
            op(&service).map_err(ApiErrorResponse::from)
        })
        .await;

        joined.unwrap_or_else(|err| {
            error!("event=store_call module=server status=error error_code=worker_failed error={err}");
            Err(ApiErrorResponse::internal_error())
        })
    }
}
