//! End-to-end API tests.
//!
//! Each test builds the full router over an isolated in-memory database
//! and drives it with `tower::ServiceExt::oneshot`, so the whole stack
//! (routing, extractors, validation, persistence) is exercised without
//! binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_api::routes;
use shelf_api::{ApiConfig, AppState};
use shelf_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = Arc::new(AppState::new(ApiConfig::for_tests(), db));
    routes::router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    request_json("POST", uri, token, body)
}

fn put_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    request_json("PUT", uri, token, body)
}

fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn request_json(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user and returns a bearer token.
async fn register(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register/",
            None,
            &json!({"username": username, "password": "correct horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

/// Creates an author and returns its id.
async fn create_author(app: &Router, token: &str, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/authors/create/",
            Some(token),
            &json!({"name": name}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

/// Creates a book and returns its id.
async fn create_book(app: &Router, token: &str, title: &str, year: i64, author: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books/create/",
            Some(token),
            &json!({"title": title, "publication_year": year, "author": author}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["migrations_applied"], body["migrations_total"]);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let app = test_app().await;
    register(&app, "reader").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login/",
            None,
            &json!({"username": "reader", "password": "correct horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "reader");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let app = test_app().await;
    register(&app, "reader").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/login/",
            None,
            &json!({"username": "reader", "password": "wrong horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_username_is_409() {
    let app = test_app().await;
    register(&app, "reader").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/register/",
            None,
            &json!({"username": "reader", "password": "another pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_short_password_is_400() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/auth/register/",
            None,
            &json!({"username": "reader", "password": "short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["field"], "password");
}

// =============================================================================
// Access Control
// =============================================================================

#[tokio::test]
async fn test_mutations_require_auth() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books/create/",
            None,
            &json!({"title": "X", "publication_year": 2000, "author": "whatever"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(delete("/api/books/some-id/delete/", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json(
            "/api/authors/create/",
            Some("not-a-real-token"),
            &json!({"name": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_with_valid_token_is_403() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = Arc::new(AppState::new(ApiConfig::for_tests(), db.clone()));
    let app = routes::router(state);

    let token = register(&app, "editor").await;

    let user = db.users().get_by_username("editor").await.unwrap().unwrap();
    db.users().set_active(&user.id, false).await.unwrap();

    let response = app
        .oneshot(post_json(
            "/api/authors/create/",
            Some(&token),
            &json!({"name": "Somebody"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reads_are_open() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/api/books/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    let response = app.oneshot(get("/api/authors/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Book CRUD
// =============================================================================

#[tokio::test]
async fn test_book_crud_cycle() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    let author_id = create_author(&app, &token, "J.K. Rowling").await;

    let book_id = create_book(
        &app,
        &token,
        "Harry Potter and the Philosopher's Stone",
        1997,
        &author_id,
    )
    .await;

    // Read it back; the author is embedded
    let response = app
        .clone()
        .oneshot(get(&format!("/api/books/{}/", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Harry Potter and the Philosopher's Stone");
    assert_eq!(body["publication_year"], 1997);
    assert_eq!(body["author"]["name"], "J.K. Rowling");

    // Update
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/books/{}/update/", book_id),
            Some(&token),
            &json!({
                "title": "Harry Potter and the Sorcerer's Stone",
                "publication_year": 1998,
                "author": author_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Harry Potter and the Sorcerer's Stone");
    assert_eq!(body["publication_year"], 1998);

    // Delete, then the read is a 404
    let response = app
        .clone()
        .oneshot(delete(
            &format!("/api/books/{}/delete/", book_id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/books/{}/", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_validation() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    let author_id = create_author(&app, &token, "Somebody").await;

    // Empty title
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books/create/",
            Some(&token),
            &json!({"title": "   ", "publication_year": 2000, "author": author_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "title");

    // Future year
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books/create/",
            Some(&token),
            &json!({"title": "Tomorrow", "publication_year": 3000, "author": author_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["field"], "publication_year");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("cannot be in the future"));

    // Unknown author
    let response = app
        .oneshot(post_json(
            "/api/books/create/",
            Some(&token),
            &json!({
                "title": "Orphan",
                "publication_year": 2000,
                "author": "550e8400-e29b-41d4-a716-446655440000",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "author");
}

// =============================================================================
// Listing: filter, search, ordering
// =============================================================================

/// Seeds the catalog and returns (rowling_id, martin_id).
async fn seed_catalog(app: &Router, token: &str) -> (String, String) {
    let rowling = create_author(app, token, "J.K. Rowling").await;
    let martin = create_author(app, token, "George R.R. Martin").await;

    create_book(
        app,
        token,
        "Harry Potter and the Philosopher's Stone",
        1997,
        &rowling,
    )
    .await;
    create_book(
        app,
        token,
        "Harry Potter and the Chamber of Secrets",
        1998,
        &rowling,
    )
    .await;
    create_book(app, token, "A Game of Thrones", 1996, &martin).await;

    (rowling, martin)
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_default_ordering_is_newest_first() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    seed_catalog(&app, &token).await;

    let response = app.oneshot(get("/api/books/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        titles(&body),
        vec![
            "Harry Potter and the Chamber of Secrets",
            "Harry Potter and the Philosopher's Stone",
            "A Game of Thrones",
        ]
    );
}

#[tokio::test]
async fn test_list_filters() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    let (_, martin) = seed_catalog(&app, &token).await;

    // Case-insensitive title contains
    let response = app
        .clone()
        .oneshot(get("/api/books/?title=HARRY"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Exact author id
    let response = app
        .clone()
        .oneshot(get(&format!("/api/books/?author={}", martin)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(titles(&body), vec!["A Game of Thrones"]);

    // Year range
    let response = app
        .clone()
        .oneshot(get("/api/books/?publication_year_min=1997&publication_year_max=1997"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        titles(&body),
        vec!["Harry Potter and the Philosopher's Stone"]
    );

    // Search spans author names
    let response = app
        .clone()
        .oneshot(get("/api/books/?search=martin"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(titles(&body), vec!["A Game of Thrones"]);

    // No match is an empty array, not an error
    let response = app
        .oneshot(get("/api/books/?title=nonexistent"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_ordering_parameter() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    seed_catalog(&app, &token).await;

    let response = app
        .clone()
        .oneshot(get("/api/books/?ordering=title"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        titles(&body),
        vec![
            "A Game of Thrones",
            "Harry Potter and the Chamber of Secrets",
            "Harry Potter and the Philosopher's Stone",
        ]
    );

    // Unknown fields are skipped; an all-unknown list falls back to default
    let response = app
        .oneshot(get("/api/books/?ordering=bogus"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(
        body[0]["title"],
        "Harry Potter and the Chamber of Secrets"
    );
}

#[tokio::test]
async fn test_list_rejects_malformed_year() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/books/?publication_year=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["field"], "publication_year");
}

// =============================================================================
// Authors
// =============================================================================

#[tokio::test]
async fn test_author_response_nests_books() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    let (rowling, _) = seed_catalog(&app, &token).await;

    let response = app
        .oneshot(get(&format!("/api/authors/{}/", rowling)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "J.K. Rowling");
    assert_eq!(body["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_author_removes_their_books() {
    let app = test_app().await;
    let token = register(&app, "editor").await;
    let (rowling, _) = seed_catalog(&app, &token).await;

    let response = app
        .clone()
        .oneshot(delete(
            &format!("/api/authors/{}/delete/", rowling),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/books/")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(titles(&body), vec!["A Game of Thrones"]);
}

#[tokio::test]
async fn test_unknown_author_is_404() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/authors/no-such-author/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
