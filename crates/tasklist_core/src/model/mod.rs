//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record shared by the store, the HTTP layer
//!   and the client.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod task;
