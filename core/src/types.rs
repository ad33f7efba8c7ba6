//! DTOs for the todo API.
//!
//! These mirror the server's wire schema but are defined independently so the
//! client does not depend on axum or the server's internals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TodoId = u64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// `{status, data}` wrapper around every successful payload. Only `data` is
/// read; the status code already says whether the call succeeded.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Any body whose interesting part is `message`: error responses, health
/// checks and delete confirmations.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}
