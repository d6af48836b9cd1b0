//! Author endpoints.
//!
//! Author responses embed the author's books so callers get the nested
//! view in one request. Deleting an author removes their books too.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use shelf_core::{validation, Author, Book};
use shelf_db::repository::author::generate_author_id;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Author as returned to callers, with their books nested.
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
    pub books: Vec<BookSummary>,
}

/// Flat book reference inside an author response.
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub publication_year: i64,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        BookSummary {
            id: book.id,
            title: book.title,
            publication_year: book.publication_year,
        }
    }
}

/// Write payload for author creation.
#[derive(Debug, Deserialize)]
pub struct AuthorPayload {
    pub name: String,
}

/// GET /api/authors/
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AuthorResponse>>> {
    let authors = state.db.authors().list().await?;

    let mut responses = Vec::with_capacity(authors.len());
    for author in authors {
        let books = state.db.books().list_by_author(&author.id).await?;
        responses.push(AuthorResponse {
            id: author.id,
            name: author.name,
            books: books.into_iter().map(BookSummary::from).collect(),
        });
    }

    Ok(Json(responses))
}

/// GET /api/authors/:id/
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AuthorResponse>> {
    let author = state
        .db
        .authors()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Author not found: {}", id)))?;

    let books = state.db.books().list_by_author(&author.id).await?;

    Ok(Json(AuthorResponse {
        id: author.id,
        name: author.name,
        books: books.into_iter().map(BookSummary::from).collect(),
    }))
}

/// POST /api/authors/create/ (authenticated)
pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<AuthorPayload>,
) -> ApiResult<(StatusCode, Json<AuthorResponse>)> {
    validation::validate_author_name(&payload.name)?;

    let now = Utc::now();
    let author = Author {
        id: generate_author_id(),
        name: payload.name.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    let inserted = state.db.authors().insert(&author).await?;
    tracing::info!(author_id = %inserted.id, user = %user.username, "Author created");

    Ok((
        StatusCode::CREATED,
        Json(AuthorResponse {
            id: inserted.id,
            name: inserted.name,
            books: Vec::new(),
        }),
    ))
}

/// DELETE /api/authors/:id/delete/ (authenticated)
///
/// The author's books are deleted in the same statement via FK cascade.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.authors().delete(&id).await?;
    tracing::info!(author_id = %id, user = %user.username, "Author deleted (books cascaded)");

    Ok(StatusCode::NO_CONTENT)
}
