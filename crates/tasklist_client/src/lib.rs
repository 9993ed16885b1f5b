//! Task list client: HTTP API access, local view state and rendering.
//!
//! # Responsibility
//! - Keep a local, disposable copy of the server's task collection.
//! - Change that copy only from server-confirmed responses.
//!
//! # See also
//! - `controller` for the per-action contract.

pub mod api;
pub mod cache;
pub mod controller;
pub mod state;
pub mod view;

pub use api::{ApiError, HttpTaskApi, TaskApi};
pub use cache::TaskCache;
pub use controller::{ClientError, Key, TaskListController};
pub use state::{EditSession, Focus, TaskListState};
pub use view::{render, ViewModel};
