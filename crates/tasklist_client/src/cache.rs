//! Local copy of the server's task collection.
//!
//! # Invariants
//! - Entries keep the server's order; replacements never move a row.
//! - At most one entry per `TaskId`.

use tasklist_core::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCache {
    tasks: Vec<Task>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the cache from a full list response.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks.clear();
        for task in tasks {
            self.append(task);
        }
    }

    /// Appends a created task, or replaces in place if the id is already cached.
    pub fn append(&mut self, task: Task) {
        if !self.replace(task.clone()) {
            self.tasks.push(task);
        }
    }

    /// Replaces the entry with the same id. Returns `false` when absent.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.position(task.id) {
            Some(index) => {
                self.tasks[index] = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.position(id).map(|index| self.tasks.remove(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Looks up by 1-based row number as shown to the user.
    pub fn get_row(&self, row: usize) -> Option<&Task> {
        row.checked_sub(1).and_then(|index| self.tasks.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}
