//! In-memory todo REST service.
//!
//! # Overview
//! Layers, innermost first:
//! - `domain`: the `Todo` entity and its request/response shapes.
//! - `repository`: the `TodoRepository` trait and its `RwLock`-guarded
//!   in-memory implementation.
//! - `usecase`: orchestration from requests to repository calls.
//! - `handler`: axum handlers, id/body parsing and the JSON envelopes.
//! - `router` / `middleware`: the route table, CORS and request tracing.
//!
//! # Design
//! The store is created once at startup and handed to the usecase through
//! `Arc<dyn TodoRepository>`; there is no global state. Data lives for the
//! lifetime of the process only.

pub mod config;
pub mod domain;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod repository;
pub mod router;
pub mod usecase;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use domain::{Todo, TodoCreateRequest, TodoId, TodoResponse, TodoUpdateRequest};
pub use error::{ApiError, TodoError};
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use router::build_router;
pub use usecase::TodoUsecase;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub usecase: TodoUsecase,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(repo: Arc<dyn TodoRepository>, config: ServerConfig) -> Self {
        Self {
            usecase: TodoUsecase::new(repo),
            config: Arc::new(config),
        }
    }
}

/// Router backed by a fresh, empty in-memory store.
pub fn app(config: ServerConfig) -> axum::Router {
    let repo = Arc::new(InMemoryTodoRepository::new());
    build_router(AppState::new(repo, config))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}
