//! Task use-case service.
//!
//! # Responsibility
//! - Provide list/create/toggle/edit/delete entry points for the HTTP layer.
//! - Turn store primitives into use-case results (read-back after write).
//!
//! # Invariants
//! - Blank text is rejected before any store call.
//! - Updates against unknown ids surface as `TaskNotFound`, never as an
//!   empty success.
//! - Delete is idempotent: unknown ids succeed without error.

use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Submitted text is empty or whitespace-only.
    InvalidText,
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidText => write!(f, "task text must not be empty"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(_) => Self::InvalidText,
            other => Self::Repo(other),
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every task in store order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = self.repo.list_tasks()?;
        info!(
            "event=task_list module=service status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    /// Creates a task from user text.
    ///
    /// # Contract
    /// - Surrounding whitespace is trimmed before storing.
    /// - The new task starts with `completed = false`.
    pub fn create_task(&self, text: &str) -> Result<Task, TaskServiceError> {
        let Some(text) = normalize_text(text) else {
            warn!("event=task_create module=service status=rejected reason=blank_text");
            return Err(TaskServiceError::InvalidText);
        };

        let id = self.repo.create_task(&Task::new(text))?;
        let created = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))?;
        info!("event=task_create module=service status=ok task_id={id}");
        Ok(created)
    }

    /// Replaces the completion flag and returns the updated task.
    pub fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, TaskServiceError> {
        self.repo
            .set_completed(id, completed)
            .map_err(|err| log_update_failure("task_toggle", id, err))?;
        let updated = self.read_back(id, "toggled task not found in read-back")?;
        info!("event=task_toggle module=service status=ok task_id={id} completed={completed}");
        Ok(updated)
    }

    /// Replaces the task text and returns the updated task.
    ///
    /// `completed` and `id` are left untouched.
    pub fn update_text(&self, id: TaskId, text: &str) -> Result<Task, TaskServiceError> {
        let Some(text) = normalize_text(text) else {
            warn!("event=task_edit module=service status=rejected reason=blank_text task_id={id}");
            return Err(TaskServiceError::InvalidText);
        };

        self.repo
            .set_text(id, text)
            .map_err(|err| log_update_failure("task_edit", id, err))?;
        let updated = self.read_back(id, "edited task not found in read-back")?;
        info!("event=task_edit module=service status=ok task_id={id}");
        Ok(updated)
    }

    /// Deletes a task by id.
    ///
    /// Returns whether a task was removed. Unknown ids are a successful no-op.
    pub fn delete_task(&self, id: TaskId) -> Result<bool, TaskServiceError> {
        let removed = self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id} removed={removed}");
        Ok(removed)
    }

    fn read_back(&self, id: TaskId, details: &'static str) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::InconsistentState(details))
    }
}

fn log_update_failure(event: &str, id: TaskId, err: RepoError) -> TaskServiceError {
    let err = TaskServiceError::from(err);
    match &err {
        TaskServiceError::TaskNotFound(_) => {
            warn!("event={event} module=service status=not_found task_id={id}");
        }
        other => {
            warn!("event={event} module=service status=error task_id={id} error={other}");
        }
    }
    err
}
