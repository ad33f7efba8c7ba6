//! axum handlers for the todo REST surface.
//!
//! Handlers parse the id segment and the JSON body, run structural
//! validation, and call exactly one usecase method. A segment that is not an
//! integer or a body that does not parse is a 400 and never reaches the
//! usecase; usecase errors are mapped through `ApiError`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::{TodoCreateRequest, TodoId, TodoResponse, TodoUpdateRequest};
use crate::error::ApiError;
use crate::AppState;

/// Success envelope carrying a payload.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

/// Success envelope carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub status: &'static str,
    pub message: String,
}

fn success<T: Serialize>(data: T) -> Json<DataEnvelope<T>> {
    Json(DataEnvelope {
        status: "success",
        data,
    })
}

/// Parses the id segment as a signed integer. Anything that is not an integer
/// is a 400; integers no todo can carry (negative) are reported as not found.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    let id = raw
        .parse::<i64>()
        .map_err(|_| ApiError::Validation("ID must be a number".to_string()))?;
    TodoId::try_from(id).map_err(|_| ApiError::NotFound(format!("todo with ID {id} not found")))
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        ApiError::Validation(format!("invalid request body: {}", rejection.body_text()))
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Todo API is running!",
    }))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Todo API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "A simple todo management API built with Rust and axum",
    }))
}

pub async fn get_all_todos(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<TodoResponse>>>, ApiError> {
    let todos = state.usecase.get_all_todos()?;
    Ok(success(todos))
}

pub async fn get_todo_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataEnvelope<TodoResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.usecase.get_todo_by_id(id)?;
    Ok(success(todo))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<TodoCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<TodoResponse>>), ApiError> {
    let req = parse_body(payload)?;
    req.validate()?;
    let todo = state.usecase.create_todo(req)?;
    Ok((StatusCode::CREATED, success(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoUpdateRequest>, JsonRejection>,
) -> Result<Json<DataEnvelope<TodoResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let req = parse_body(payload)?;
    req.validate()?;
    let todo = state.usecase.update_todo(id, &req)?;
    Ok(success(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let id = parse_id(&id)?;
    state.usecase.delete_todo(id)?;
    Ok(Json(MessageEnvelope {
        status: "success",
        message: "Todo deleted successfully".to_string(),
    }))
}

pub async fn toggle_todo_complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataEnvelope<TodoResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.usecase.toggle_todo_complete(id)?;
    Ok(success(todo))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
