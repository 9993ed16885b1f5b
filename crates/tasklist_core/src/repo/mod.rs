//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store primitives the service layer builds on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate()` before persistence.
//! - Updates against unknown ids return `RepoError::NotFound`.
//! - Deletes against unknown ids succeed and report that nothing was removed.

pub mod task_repo;
