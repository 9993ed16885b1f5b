//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: id, text and completion flag.
//! - Provide validation used by every write path.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `text` is non-empty after trimming.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Serialized as a plain string on the wire; callers should treat it as opaque.
pub type TaskId = Uuid;

/// Validation failures for task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The nil UUID is reserved and never assigned to a task.
    NilId,
    /// Text is empty or whitespace-only.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Wire shape is exactly `{ "id": string, "text": string, "completed": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task with a generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }

    /// Creates a task with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyText` when `text` is blank.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            text: text.into(),
            completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if normalize_text(&self.text).is_none() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns a copy with `completed` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Trims surrounding whitespace and returns `None` for blank input.
pub fn normalize_text(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Task};

    #[test]
    fn normalize_text_rejects_whitespace_only() {
        assert_eq!(normalize_text("  \t\n"), None);
        assert_eq!(normalize_text(" milk "), Some("milk"));
    }

    #[test]
    fn toggled_only_flips_completed() {
        let task = Task::new("water plants");
        let toggled = task.toggled();
        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.text, task.text);
        assert!(toggled.completed);
        assert_eq!(toggled.toggled(), task);
    }
}
