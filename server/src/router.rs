//! Static route table.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch},
    Router,
};

use crate::handler;
use crate::middleware::{cors_middleware, request_tracing_middleware};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let todos = Router::new()
        .route(
            "/todos",
            get(handler::get_all_todos).post(handler::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handler::get_todo_by_id)
                .put(handler::update_todo)
                .delete(handler::delete_todo),
        )
        .route("/todos/{id}/toggle", patch(handler::toggle_todo_complete));

    Router::new()
        .route("/health", get(handler::health))
        .route("/", get(handler::root))
        .nest("/api", todos)
        .fallback(handler::not_found)
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}
