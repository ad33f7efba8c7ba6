//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DataEnvelope, MessageBody, Todo, TodoId, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn todos_path(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn todo_path(&self, id: TodoId) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }

    pub fn build_health(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, format!("{}/health", self.base_url))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.todos_path())
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        bodiless(HttpMethod::Get, self.todo_path(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Post, self.todos_path(), input)
    }

    pub fn build_update_todo(&self, id: TodoId, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Put, self.todo_path(id), input)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.todo_path(id))
    }

    pub fn build_toggle_todo(&self, id: TodoId) -> HttpRequest {
        bodiless(HttpMethod::Patch, format!("{}/toggle", self.todo_path(id)))
    }

    /// Returns the server's health message.
    pub fn parse_health(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        let body: MessageBody = deserialize(&response.body)?;
        Ok(body.message)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        unwrap_data(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        unwrap_data(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        unwrap_data(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        unwrap_data(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)?;
        Ok(())
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        unwrap_data(&response.body)
    }
}

fn bodiless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body<T: serde::Serialize>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn deserialize<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn unwrap_data<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    deserialize::<DataEnvelope<T>>(body).map(|envelope| envelope.data)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = || {
        serde_json::from_str::<MessageBody>(&response.body)
            .map(|b| b.message)
            .unwrap_or_else(|_| response.body.clone())
    };
    match response.status {
        404 => Err(ApiError::NotFound { message: message() }),
        400 => Err(ApiError::BadRequest { message: message() }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
