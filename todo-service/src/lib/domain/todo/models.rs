use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::page::Page;
use crate::domain::todo::errors::TodoStateError;
use crate::domain::todo::errors::TodoTitleError;
use crate::domain::user::models::UserId;

/// To-do aggregate entity, owned by exactly one account.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a to-do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoState {
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

impl TodoState {
    pub const ALL: [TodoState; 5] = [
        TodoState::Draft,
        TodoState::Todo,
        TodoState::Doing,
        TodoState::Done,
        TodoState::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoState::Draft => "draft",
            TodoState::Todo => "todo",
            TodoState::Doing => "doing",
            TodoState::Done => "done",
            TodoState::Trash => "trash",
        }
    }
}

impl FromStr for TodoState {
    type Err = TodoStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| TodoStateError::Unknown(s.to_string()))
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-blank to-do title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        if title.trim().is_empty() {
            return Err(TodoTitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// To-do fields ready for insertion.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
    pub user_id: UserId,
}

#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
}

/// Partial update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl UpdateTodoCommand {
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(state) = self.state {
            todo.state = state;
        }
    }
}

/// Listing criteria within one owner's to-dos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Case-insensitive substring matched against title or description
    pub search: Option<String>,
    pub state: Option<TodoState>,
    pub page: Page,
}

impl TodoFilter {
    /// Whether `todo` satisfies `search` and `state`; paging is not applied.
    pub fn matches(&self, todo: &Todo) -> bool {
        let state_matches = self.state.map_or(true, |state| todo.state == state);

        let search_matches = self.search.as_deref().map_or(true, |search| {
            let needle = search.to_lowercase();
            todo.title.as_str().to_lowercase().contains(&needle)
                || todo.description.to_lowercase().contains(&needle)
        });

        state_matches && search_matches
    }
}
