//! User actions over the task list.
//!
//! # Contract
//! - Each action issues at most one request and awaits it.
//! - Local state changes only after a successful response; a failed request
//!   leaves the state exactly as it was.
//! - Validation (blank text, unknown row, locked row) happens before any
//!   request is made.
//! - Nothing is retried.

use crate::api::{ApiError, TaskApi};
use crate::state::{EditSession, Focus, TaskListState};
use crate::view::ViewModel;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tasklist_core::{normalize_text, TaskId};

/// Key presses routed to the focused input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

#[derive(Debug)]
pub enum ClientError {
    /// Input is empty or whitespace-only.
    BlankText,
    /// The id is not in the local collection.
    UnknownTask(TaskId),
    /// The row is being edited; only save and cancel act on it.
    RowLocked(TaskId),
    /// Save was requested with no edit in progress.
    NotEditing,
    Api(ApiError),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "task text must not be empty"),
            Self::UnknownTask(id) => write!(f, "no such task: {id}"),
            Self::RowLocked(id) => write!(f, "task {id} is being edited"),
            Self::NotEditing => write!(f, "no task is being edited"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

pub struct TaskListController<A: TaskApi> {
    api: A,
    state: TaskListState,
}

impl<A: TaskApi> TaskListController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: TaskListState::new(),
        }
    }

    pub fn state(&self) -> &TaskListState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::from_state(&self.state)
    }

    /// Fetches the full list once. On failure the list stays empty.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.state.loading = true;
        let result = self.api.list_tasks().await;
        self.state.loading = false;

        match result {
            Ok(tasks) => {
                info!("event=task_load module=client status=ok count={}", tasks.len());
                self.state.tasks.replace_all(tasks);
                Ok(())
            }
            Err(err) => {
                warn!("event=task_load module=client status=error error={err}");
                Err(err.into())
            }
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
        self.state.focus = Focus::AddInput;
    }

    /// Submits the add input. On success appends the task and clears the input.
    pub async fn add(&mut self) -> Result<(), ClientError> {
        let Some(text) = normalize_text(&self.state.input) else {
            return Err(ClientError::BlankText);
        };

        match self.api.create_task(text).await {
            Ok(task) => {
                info!("event=task_add module=client status=ok task_id={}", task.id);
                self.state.tasks.append(task);
                self.state.input.clear();
                Ok(())
            }
            Err(err) => Err(log_failure("task_add", err)),
        }
    }

    pub async fn delete(&mut self, id: TaskId) -> Result<(), ClientError> {
        self.ensure_row_actionable(id)?;

        match self.api.delete_task(id).await {
            Ok(()) => {
                info!("event=task_delete module=client status=ok task_id={id}");
                self.state.tasks.remove(id);
                Ok(())
            }
            Err(err) => Err(log_failure("task_delete", err)),
        }
    }

    /// Submits the negation of the cached flag and stores the server's copy.
    pub async fn toggle(&mut self, id: TaskId) -> Result<(), ClientError> {
        self.ensure_row_actionable(id)?;
        let completed = self
            .state
            .tasks
            .get(id)
            .map(|task| !task.completed)
            .ok_or(ClientError::UnknownTask(id))?;

        match self.api.set_completed(id, completed).await {
            Ok(task) => {
                info!("event=task_toggle module=client status=ok task_id={id} completed={}", task.completed);
                self.state.tasks.replace(task);
                Ok(())
            }
            Err(err) => Err(log_failure("task_toggle", err)),
        }
    }

    /// Opens an edit session pre-filled with the task's text.
    ///
    /// Opening a session for another row discards the previous one.
    pub fn begin_edit(&mut self, id: TaskId) -> Result<(), ClientError> {
        self.ensure_row_actionable(id)?;
        let text = self
            .state
            .tasks
            .get(id)
            .map(|task| task.text.clone())
            .ok_or(ClientError::UnknownTask(id))?;

        self.state.editing = Some(EditSession { id, buffer: text });
        self.state.focus = Focus::EditInput;
        Ok(())
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) -> Result<(), ClientError> {
        let session = self.state.editing.as_mut().ok_or(ClientError::NotEditing)?;
        session.buffer = text.into();
        self.state.focus = Focus::EditInput;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
        self.state.focus = Focus::AddInput;
    }

    /// Submits the edit buffer. On success replaces the row and leaves edit mode.
    pub async fn save_edit(&mut self) -> Result<(), ClientError> {
        let session = self.state.editing.as_ref().ok_or(ClientError::NotEditing)?;
        let id = session.id;
        let Some(text) = normalize_text(&session.buffer) else {
            return Err(ClientError::BlankText);
        };

        match self.api.update_text(id, text).await {
            Ok(task) => {
                info!("event=task_edit module=client status=ok task_id={id}");
                self.state.tasks.replace(task);
                self.cancel_edit();
                Ok(())
            }
            Err(err) => Err(log_failure("task_edit", err)),
        }
    }

    /// Routes a key press to the focused input.
    ///
    /// Enter on the add input is Add; Enter on the edit input is Save;
    /// Escape on the edit input is Cancel.
    pub async fn handle_key(&mut self, key: Key) -> Result<(), ClientError> {
        match (self.state.focus, key) {
            (Focus::AddInput, Key::Enter) => self.add().await,
            (Focus::EditInput, Key::Enter) => self.save_edit().await,
            (Focus::EditInput, Key::Escape) => {
                self.cancel_edit();
                Ok(())
            }
            (Focus::AddInput, Key::Escape) => Ok(()),
            (focus, Key::Char(ch)) => {
                self.focused_buffer(focus)?.push(ch);
                Ok(())
            }
            (focus, Key::Backspace) => {
                self.focused_buffer(focus)?.pop();
                Ok(())
            }
        }
    }

    fn focused_buffer(&mut self, focus: Focus) -> Result<&mut String, ClientError> {
        match focus {
            Focus::AddInput => Ok(&mut self.state.input),
            Focus::EditInput => self
                .state
                .editing
                .as_mut()
                .map(|session| &mut session.buffer)
                .ok_or(ClientError::NotEditing),
        }
    }

    fn ensure_row_actionable(&self, id: TaskId) -> Result<(), ClientError> {
        if self.state.is_editing(id) {
            return Err(ClientError::RowLocked(id));
        }
        if self.state.tasks.get(id).is_none() {
            return Err(ClientError::UnknownTask(id));
        }
        Ok(())
    }
}

fn log_failure(event: &str, err: ApiError) -> ClientError {
    warn!("event={event} module=client status=error error={err}");
    ClientError::Api(err)
}
