//! HTTP API tests driven through the router with `oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_lib::routes::create_router;
use api_lib::state::AppState;
use common::{AppError, StorageBackend};
use user_service_lib::repository::MockUserRepository;
use user_service_lib::service::UserManager;
use user_service_lib::Storage;

fn app() -> Router {
    create_router(AppState::from_storage(Storage::in_memory(), "user-api"))
}

fn app_with(repo: MockUserRepository) -> Router {
    let service = Arc::new(UserManager::new(Arc::new(repo)));
    let state = AppState::new(service, StorageBackend::Memory, None, "user-api");
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_user_lifecycle_over_http() {
    let app = app();

    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Ana");
    assert_eq!(created["email"], "ana@x.com");
    assert_eq!(created["created_at"], created["updated_at"]);

    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Bruno", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(response).await["error"]["code"], "CONFLICT");

    let response = send(&app, Method::GET, "/users", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["users"][0]["id"], id.as_str());

    let response = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(json!({"email": "ana2@x.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["email"], "ana2@x.com");
    assert_eq!(updated["name"], "Ana");
    assert_eq!(updated["created_at"], created["created_at"]);

    let response = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["email"], "ana2@x.com");

    let response = send(&app, Method::DELETE, &format!("/users/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");

    let response = send(&app, Method::DELETE, &format!("/users/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_rejects_invalid_payloads() {
    let app = app();

    for payload in [
        json!({"name": "", "email": "ana@x.com"}),
        json!({"name": "Ana", "email": ""}),
        json!({"name": "Ana", "email": "not-an-email"}),
    ] {
        let response = send(&app, Method::POST, "/users", Some(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    let response = send(&app, Method::GET, "/users", None).await;
    assert_eq!(json_body(response).await["total"], 0);
}

#[tokio::test]
async fn test_create_user_names_missing_name() {
    let app = app();

    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "", "email": "ana@x.com"})),
    )
    .await;

    assert_eq!(
        json_body(response).await["error"]["message"],
        "name is required"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["code"],
        "VALIDATION_ERROR"
    );
}

#[tokio::test]
async fn test_update_rejects_empty_name() {
    let app = app();
    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@x.com"})),
    )
    .await;
    let id = json_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(json_body(response).await["name"], "Ana");
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = app();

    let response = send(
        &app,
        Method::PUT,
        "/users/00000000-0000-0000-0000-000000000000",
        Some(json!({"name": "Ana"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_hidden_behind_500() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all()
        .returning(|| Err(AppError::internal("connection refused")));
    let app = app_with(repo);

    let response = send(&app, Method::GET, "/users", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = app();

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "user-api");
    assert_eq!(body["storage"]["backend"], "memory");
    assert_eq!(body["storage"]["status"], "healthy");
    assert!(body["storage"].get("error").is_none());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/users")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_preflight_lists_allowed_methods_and_headers() {
    let app = app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/users")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{} not in {}", method, methods);
    }

    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("authorization"));
}

#[tokio::test]
async fn test_openapi_document_lists_user_paths() {
    let app = app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"].get("/users").is_some());
    assert!(doc["paths"].get("/users/{id}").is_some());
}

#[tokio::test]
async fn test_openapi_document_carries_user_schema_examples() {
    let app = app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    let doc = json_body(response).await;
    let email = &doc["components"]["schemas"]["UserResponse"]["properties"]["email"];
    assert_eq!(email["example"], "jane@example.com");
}
