//! Rendering of the task list state.
//!
//! `ViewModel` is a plain projection of `TaskListState`; `render` turns it
//! into terminal text.

use crate::state::TaskListState;
use tasklist_core::TaskId;

pub const TITLE: &str = "My Task List";
pub const LOADING_MESSAGE: &str = "Loading tasks...";
pub const EMPTY_TITLE: &str = "You have no pending tasks!";
pub const EMPTY_HINT: &str = "Add a new task to get started.";
pub const FOOTER_HINT: &str = "Tip: press Enter to add a task quickly.";

const STRIKE: char = '\u{0336}';

/// Controls offered on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowControls {
    pub toggle: bool,
    pub edit: bool,
    pub delete: bool,
    pub save: bool,
}

impl RowControls {
    fn idle() -> Self {
        Self {
            toggle: true,
            edit: true,
            delete: true,
            save: false,
        }
    }

    fn editing() -> Self {
        Self {
            toggle: false,
            edit: false,
            delete: false,
            save: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based row number.
    pub row: usize,
    pub id: TaskId,
    /// Stored text, or the pending buffer for the row being edited.
    pub text: String,
    pub completed: bool,
    pub editing: bool,
    pub controls: RowControls,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Empty,
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub count: usize,
    pub input: String,
    pub can_add: bool,
    pub body: ListBody,
}

impl ViewModel {
    pub fn from_state(state: &TaskListState) -> Self {
        let body = if state.loading {
            ListBody::Loading
        } else if state.tasks.is_empty() {
            ListBody::Empty
        } else {
            ListBody::Rows(
                state
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(index, task)| {
                        let session = state.editing.as_ref().filter(|edit| edit.id == task.id);
                        RowView {
                            row: index + 1,
                            id: task.id,
                            text: session.map_or_else(|| task.text.clone(), |edit| edit.buffer.clone()),
                            completed: task.completed,
                            editing: session.is_some(),
                            controls: if session.is_some() {
                                RowControls::editing()
                            } else {
                                RowControls::idle()
                            },
                        }
                    })
                    .collect(),
            )
        };

        Self {
            count: state.tasks.len(),
            input: state.input.clone(),
            can_add: state.can_add(),
            body,
        }
    }
}

/// Renders the view as terminal text, one line per element.
pub fn render(view: &ViewModel) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        format!("New task: [{}]{}", view.input, if view.can_add { "  (Enter to add)" } else { "" }),
        String::new(),
        format!("Your tasks ({})", view.count),
    ];

    match &view.body {
        ListBody::Loading => lines.push(format!("  {LOADING_MESSAGE}")),
        ListBody::Empty => {
            lines.push(format!("  {EMPTY_TITLE}"));
            lines.push(format!("  {EMPTY_HINT}"));
        }
        ListBody::Rows(rows) => lines.extend(rows.iter().map(render_row)),
    }

    lines.push(String::new());
    lines.push(FOOTER_HINT.to_string());
    lines.join("\n")
}

fn render_row(row: &RowView) -> String {
    let check = if row.completed { "[x]" } else { "[ ]" };
    if row.editing {
        return format!("{:>3}. {check} > {}_   (Enter: save, Esc: cancel)", row.row, row.text);
    }
    let text = if row.completed {
        strike_through(&row.text)
    } else {
        row.text.clone()
    };
    format!("{:>3}. {check} {text}", row.row)
}

fn strike_through(text: &str) -> String {
    text.chars().flat_map(|ch| [ch, STRIKE]).collect()
}
