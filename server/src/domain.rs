//! Entity and request/response shapes for todo items.
//!
//! # Design
//! `Todo` is the stored representation and `TodoResponse` the wire
//! representation. They carry the same fields today but are kept apart so the
//! store can change without touching the JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Identifier assigned by the store. Starts at 1 and is never reused.
pub type TodoId = u64;

/// A single todo item as held by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller controls when creating a todo. Identity, completion and
/// timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Request payload for `POST /api/todos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TodoCreateRequest {
    pub fn validate(&self) -> Result<(), TodoError> {
        validate_title(&self.title)
    }
}

impl From<TodoCreateRequest> for NewTodo {
    fn from(req: TodoCreateRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

/// Request payload for `PUT /api/todos/{id}`. A `None` field is left
/// unchanged; `Some("")` or `Some(false)` are explicit values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    pub fn validate(&self) -> Result<(), TodoError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Apply the supplied fields to `todo`. Timestamps are the caller's job.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Externally visible projection of a `Todo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}
