use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use todo_server::{app, ServerConfig, TodoResponse};
use tower::ServiceExt;

fn test_app() -> Router {
    app(ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send a request through a shared router so state persists across calls.
async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

fn todo_from(envelope: &Value) -> TodoResponse {
    serde_json::from_value(envelope["data"].clone()).unwrap()
}

// --- health / root ---

#[tokio::test]
async fn health_reports_ok() {
    let resp = test_app().oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Todo API is running!");
}

#[tokio::test]
async fn root_returns_welcome_payload() {
    let resp = test_app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Welcome to Todo API");
    assert!(body["version"].is_string());
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todos"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], Value::Array(Vec::new()));
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_first_id() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/todos", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    let todo = todo_from(&body);
    assert_eq!(todo.id, 1);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, "");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_missing_title_returns_400() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/todos", r#"{"description":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_todo_blank_title_returns_400() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/todos", r#"{"title":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/todos", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_todo_without_content_type_returns_400() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/todos")
        .body(r#"{"title":"x"}"#.to_string())
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todos/7"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "todo with ID 7 not found");
}

#[tokio::test]
async fn get_todo_non_numeric_id_returns_400() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todos/abc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "ID must be a number");
}

#[tokio::test]
async fn get_todo_negative_id_returns_404() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/todos/-1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "todo with ID -1 not found");
}

#[tokio::test]
async fn toggle_and_delete_negative_id_return_404() {
    let app = test_app();

    let resp = send(&app, empty_request("PATCH", "/api/todos/-3/toggle")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("DELETE", "/api/todos/-3")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = test_app()
        .oneshot(json_request("PUT", "/api/todos/1", r#"{"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_invalid_id_returns_400() {
    let resp = test_app()
        .oneshot(json_request("PUT", "/api/todos/x1", r#"{"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_todo_partial_fields() {
    let app = test_app();
    send(
        &app,
        json_request(
            "POST",
            "/api/todos",
            r#"{"title":"Write report","description":"quarterly"}"#,
        ),
    )
    .await;

    let resp = send(
        &app,
        json_request("PUT", "/api/todos/1", r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todo = todo_from(&body_json(resp).await);
    assert_eq!(todo.title, "Write report");
    assert_eq!(todo.description, "quarterly");
    assert!(todo.completed);

    let resp = send(
        &app,
        json_request("PUT", "/api/todos/1", r#"{"description":""}"#),
    )
    .await;
    let todo = todo_from(&body_json(resp).await);
    assert_eq!(todo.description, "");
    assert!(todo.completed);
}

#[tokio::test]
async fn update_todo_bad_body_never_reaches_store() {
    let app = test_app();
    send(&app, json_request("POST", "/api/todos", r#"{"title":"Keep"}"#)).await;

    let resp = send(
        &app,
        json_request("PUT", "/api/todos/1", r#"{"completed":"yes"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, empty_request("GET", "/api/todos/1")).await;
    let todo = todo_from(&body_json(resp).await);
    assert!(!todo.completed);
    assert_eq!(todo.created_at, todo.updated_at);
}

// --- delete / toggle ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = test_app()
        .oneshot(empty_request("DELETE", "/api/todos/3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toggle_invalid_id_returns_400() {
    let resp = test_app()
        .oneshot(empty_request("PATCH", "/api/todos/abc/toggle"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_not_found() {
    let resp = test_app()
        .oneshot(empty_request("PATCH", "/api/todos/1/toggle"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- CORS / misc ---

#[tokio::test]
async fn preflight_short_circuits_with_204() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/todos")
        .header(http::header::ORIGIN, "http://localhost:3000")
        .body(String::new())
        .unwrap();
    let resp = test_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let headers = resp.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(
        headers["access-control-allow-methods"],
        "POST, OPTIONS, GET, PUT, DELETE, PATCH"
    );
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn cors_headers_on_regular_and_error_responses() {
    let app = test_app();

    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );

    let resp = send(&app, empty_request("GET", "/api/todos/99")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn configured_origin_is_used() {
    let config = ServerConfig {
        allowed_origin: "http://example.test".to_string(),
        ..ServerConfig::default()
    };
    let resp = app(config)
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "http://example.test"
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let resp = test_app().oneshot(empty_request("GET", "/health")).await.unwrap();
    let id = resp.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let resp = test_app()
        .oneshot(empty_request("GET", "/api/nothing"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
}

// --- full lifecycle ---

#[tokio::test]
async fn buy_milk_lifecycle() {
    let app = test_app();

    // create
    let resp = send(
        &app,
        json_request("POST", "/api/todos", r#"{"title":"Buy milk"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = todo_from(&body_json(resp).await);
    assert_eq!(created.id, 1);
    assert!(!created.completed);

    // get
    let resp = send(&app, empty_request("GET", "/api/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(todo_from(&body_json(resp).await), created);

    // list
    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // toggle
    let resp = send(&app, empty_request("PATCH", "/api/todos/1/toggle")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let toggled = todo_from(&body_json(resp).await);
    assert!(toggled.completed);
    assert!(toggled.updated_at > created.updated_at);

    // delete
    let resp = send(&app, empty_request("DELETE", "/api/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Todo deleted successfully");

    // get after delete
    let resp = send(&app, empty_request("GET", "/api/todos/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // next create does not reuse the id
    let resp = send(
        &app,
        json_request("POST", "/api/todos", r#"{"title":"Buy bread"}"#),
    )
    .await;
    assert_eq!(todo_from(&body_json(resp).await).id, 2);
}
