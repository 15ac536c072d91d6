//! End-to-end API tests driving the built router in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use libris::modules;
use libris_kernel::settings::Settings;
use libris_kernel::{InitCtx, ModuleRegistry};

/// Build the full application router over a fresh in-memory store.
async fn test_app() -> Router {
    let settings = Settings::default();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    libris_db::apply_migrations(&pool, &registry.collect_migrations())
        .await
        .unwrap();

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };

    libris_http::build_router(&registry, &ctx)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, bytes.to_vec())
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

fn dune() -> Value {
    json!({"title": "Dune", "author": "Herbert", "rating": 4.8, "price": 12.5})
}

#[tokio::test]
async fn list_on_empty_store_is_a_success_envelope() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/book", None).await;
    assert_eq!(status, StatusCode::OK);

    let body = parse(&body);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["books"], json!([]));
    assert_eq!(body["messages"], json!([]));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn create_then_get_returns_the_stored_book() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/v1/book", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);

    let created = parse(&body);
    assert_eq!(created["success"], json!(true));
    let book = &created["result"]["book"];
    assert_eq!(book["id"], json!(1));
    assert_eq!(book["title"], json!("Dune"));
    assert_eq!(book["author"], json!("Herbert"));
    assert_eq!(book["rating"], json!(4.8));
    assert_eq!(book["price"], json!(12.5));
    assert!(book["created_at"].is_string());
    assert!(book["deleted_at"].is_null());

    let (status, body) = send(&app, "GET", "/api/v1/book/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["result"]["book"]["title"], json!("Dune"));
}

#[tokio::test]
async fn both_api_versions_resolve_to_the_same_store() {
    let app = test_app().await;

    let (status, _) = send(&app, "POST", "/api/v2/book", Some(dune())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, v1_body) = send(&app, "GET", "/api/v1/book", None).await;
    let (_, v2_body) = send(&app, "GET", "/api/v2/book", None).await;

    assert_eq!(parse(&v1_body)["result"]["books"].as_array().unwrap().len(), 1);
    assert_eq!(parse(&v1_body), parse(&v2_body));
}

#[tokio::test]
async fn create_with_empty_body_defaults_every_field() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/v1/book", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let book = parse(&body)["result"]["book"].clone();
    assert_eq!(book["title"], json!(""));
    assert_eq!(book["rating"], json!(0.0));
}

#[tokio::test]
async fn malformed_body_is_unprocessable() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/book")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error = &parse(&bytes)["errors"][0];
    assert_eq!(error["code"], json!(422));
    assert_eq!(error["source"], json!("create_book"));
    assert_eq!(error["title"], json!("Unprocessable Entity"));
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = test_app().await;

    for (method, source) in [("GET", "get_book"), ("DELETE", "delete_book")] {
        let (status, body) = send(&app, method, "/api/v1/book/not-a-number", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error = &parse(&body)["errors"][0];
        assert_eq!(error["code"], json!(400));
        assert_eq!(error["source"], json!(source));
        assert_eq!(error["title"], json!("Bad Request"));
        assert!(error["message"].is_string());
    }
}

#[tokio::test]
async fn get_missing_book_returns_enveloped_404() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/book/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error = &parse(&body)["errors"][0];
    assert_eq!(error["code"], json!(404));
    assert_eq!(error["source"], json!("get_book"));
    assert_eq!(error["message"], json!("book 99 not found"));
}

#[tokio::test]
async fn delete_missing_book_returns_404_with_empty_body() {
    let app = test_app().await;

    let (status, body) = send(&app, "DELETE", "/api/v1/book/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn delete_echoes_the_tombstoned_book_and_hides_it_thereafter() {
    let app = test_app().await;

    send(&app, "POST", "/api/v1/book", Some(dune())).await;

    let (status, body) = send(&app, "DELETE", "/api/v1/book/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let deleted = parse(&body);
    assert_eq!(deleted["success"], json!(true));
    assert_eq!(deleted["result"]["book"]["id"], json!(1));
    assert!(deleted["result"]["book"]["deleted_at"].is_string());

    let (status, _) = send(&app, "GET", "/api/v1/book/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/v1/book", None).await;
    assert_eq!(parse(&body)["result"]["books"], json!([]));

    // Second delete hits the empty-body 404 path.
    let (status, body) = send(&app, "DELETE", "/api/v1/book/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn cors_is_permissive_on_every_route() {
    let app = test_app().await;

    for uri in ["/api/v1/book", "/api/v2/book", "/healthz"] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*"),
            "missing permissive CORS header on {uri}"
        );
    }
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = test_app().await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/book")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .is_some());
}

#[tokio::test]
async fn health_check_is_live() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn openapi_spec_lists_every_versioned_route() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let spec = parse(&body);
    for path in [
        "/api/v1/book",
        "/api/v2/book",
        "/api/v1/book/{id}",
        "/api/v2/book/{id}",
    ] {
        assert!(spec["paths"].get(path).is_some(), "missing {path}");
    }
}
