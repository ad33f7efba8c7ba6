//! Business operations on todos.
//!
//! Each method maps a request onto one repository call and projects the
//! result into a `TodoResponse`. Toggle is the exception: it reads the current
//! state and then writes the flipped flag.

use std::sync::Arc;

use crate::domain::{NewTodo, TodoCreateRequest, TodoId, TodoResponse, TodoUpdateRequest};
use crate::error::TodoError;
use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct TodoUsecase {
    repo: Arc<dyn TodoRepository>,
}

impl TodoUsecase {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub fn get_all_todos(&self) -> Result<Vec<TodoResponse>, TodoError> {
        let todos = self.repo.get_all()?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    pub fn get_todo_by_id(&self, id: TodoId) -> Result<TodoResponse, TodoError> {
        self.repo.get_by_id(id).map(TodoResponse::from)
    }

    pub fn create_todo(&self, req: TodoCreateRequest) -> Result<TodoResponse, TodoError> {
        let created = self.repo.create(NewTodo::from(req))?;
        tracing::info!(id = created.id, "todo created");
        Ok(created.into())
    }

    pub fn update_todo(
        &self,
        id: TodoId,
        req: &TodoUpdateRequest,
    ) -> Result<TodoResponse, TodoError> {
        if req.is_empty() {
            tracing::debug!(id, "update carries no fields, refreshing updated_at only");
        }
        let updated = self.repo.update(id, req)?;
        tracing::info!(id, "todo updated");
        Ok(updated.into())
    }

    pub fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        self.repo.delete(id)?;
        tracing::info!(id, "todo deleted");
        Ok(())
    }

    pub fn toggle_todo_complete(&self, id: TodoId) -> Result<TodoResponse, TodoError> {
        let current = self.repo.get_by_id(id)?;
        let update = TodoUpdateRequest {
            completed: Some(!current.completed),
            ..Default::default()
        };
        self.update_todo(id, &update)
    }
}
