//! HTTP surface for the task list.
//!
//! # Responsibility
//! - Expose the task collection as a single REST resource (`/tasks`).
//! - Translate HTTP verbs into `TaskService` calls and map errors to statuses.
//!
//! # Invariants
//! - Handlers hold no state between requests; the store connection is the
//!   only shared resource.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{ConfigError, CorsOrigin, ServerConfig};
pub use error::{ApiError, ApiErrorResponse};
pub use router::{build_router, serve};
pub use state::AppState;
