//! In-memory todo store.
//!
//! # Design
//! One `RwLock` guards both the map and the id counter, so id assignment and
//! insertion happen atomically. Reads share the lock; writes hold it
//! exclusively. No operation awaits while holding the guard, which is why a
//! blocking `std::sync::RwLock` is used instead of the async one.
//!
//! Every value crossing the boundary is a clone: callers can never mutate
//! what the store holds.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use crate::domain::{NewTodo, Todo, TodoId, TodoUpdateRequest};
use crate::error::TodoError;

/// Storage operations the usecase layer depends on.
pub trait TodoRepository: Send + Sync {
    /// Snapshot of every todo, in no particular order.
    fn get_all(&self) -> Result<Vec<Todo>, TodoError>;

    fn get_by_id(&self, id: TodoId) -> Result<Todo, TodoError>;

    /// Store a new todo under the next id. `completed` starts false and both
    /// timestamps are set to now.
    fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Apply the supplied fields and refresh `updated_at`.
    fn update(&self, id: TodoId, update: &TodoUpdateRequest) -> Result<Todo, TodoError>;

    fn delete(&self, id: TodoId) -> Result<(), TodoError>;
}

#[derive(Debug, Default)]
struct Store {
    todos: HashMap<TodoId, Todo>,
    last_id: TodoId,
}

#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    inner: RwLock<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose lock was poisoned by a writer that panicked.
    #[cfg(test)]
    pub(crate) fn poisoned() -> Self {
        let repo = Self::new();
        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _guard = repo.inner.write().unwrap();
                panic!("writer panicked while holding the store lock");
            });
            assert!(writer.join().is_err());
        });
        repo
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, TodoError> {
        self.inner
            .read()
            .map_err(|_| TodoError::Internal("todo store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, TodoError> {
        self.inner
            .write()
            .map_err(|_| TodoError::Internal("todo store lock poisoned".to_string()))
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn get_all(&self) -> Result<Vec<Todo>, TodoError> {
        let store = self.read()?;
        Ok(store.todos.values().cloned().collect())
    }

    fn get_by_id(&self, id: TodoId) -> Result<Todo, TodoError> {
        let store = self.read()?;
        store.todos.get(&id).cloned().ok_or(TodoError::NotFound(id))
    }

    fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut store = self.write()?;
        store.last_id += 1;
        let now = Utc::now();
        let created = Todo {
            id: store.last_id,
            title: todo.title,
            description: todo.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        store.todos.insert(created.id, created.clone());
        tracing::debug!(id = created.id, "todo stored");
        Ok(created)
    }

    fn update(&self, id: TodoId, update: &TodoUpdateRequest) -> Result<Todo, TodoError> {
        let mut store = self.write()?;
        let todo = store.todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        update.apply_to(todo);
        todo.updated_at = later_than(todo.updated_at);
        Ok(todo.clone())
    }

    fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        let mut store = self.write()?;
        store
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoError::NotFound(id))
    }
}

/// Current time, or one nanosecond past `previous` if the clock has not moved.
fn later_than(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
