//! View state held by the client.

use crate::cache::TaskCache;
use tasklist_core::TaskId;

/// Which text input receives typed characters and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AddInput,
    EditInput,
}

/// The single row currently being edited and its pending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TaskId,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListState {
    pub tasks: TaskCache,
    /// Pending text for a new task.
    pub input: String,
    /// `true` until the initial list request settles.
    pub loading: bool,
    pub focus: Focus,
    pub editing: Option<EditSession>,
}

impl TaskListState {
    /// Fresh state before the initial load.
    pub fn new() -> Self {
        Self {
            tasks: TaskCache::new(),
            input: String::new(),
            loading: true,
            focus: Focus::AddInput,
            editing: None,
        }
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing.as_ref().is_some_and(|session| session.id == id)
    }

    /// Whether the add control would accept the current input.
    pub fn can_add(&self) -> bool {
        !self.input.trim().is_empty()
    }
}

impl Default for TaskListState {
    fn default() -> Self {
        Self::new()
    }
}
