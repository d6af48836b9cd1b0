//! Book endpoints.
//!
//! The listing endpoint is the workhorse: it parses the caller's query
//! string into a `BookQuery` (rejecting malformed year values) and hands
//! it to the repository. Mutations are gated by the `AuthUser` extractor.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use shelf_core::{
    validation, Author, Book, BookQuery, BookQueryParams, ValidationError,
};
use shelf_db::repository::book::generate_book_id;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Book as returned to callers: the author is embedded, not just an id.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub publication_year: i64,
    pub author: AuthorSummary,
}

/// Flat author reference inside a book response.
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
}

impl BookResponse {
    fn from_parts(book: Book, author: &Author) -> Self {
        BookResponse {
            id: book.id,
            title: book.title,
            publication_year: book.publication_year,
            author: AuthorSummary {
                id: author.id.clone(),
                name: author.name.clone(),
            },
        }
    }
}

/// Write payload for create and update.
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub publication_year: i64,
    /// Author id the book belongs to.
    pub author: String,
}

impl BookPayload {
    /// Runs all field rules, then checks the author exists.
    async fn validate(&self, state: &AppState) -> ApiResult<Author> {
        validation::validate_title(&self.title)?;
        validation::validate_publication_year(
            self.publication_year,
            Utc::now().year() as i64,
        )?;
        validation::validate_uuid("author", &self.author)?;

        let author = state
            .db
            .authors()
            .get_by_id(&self.author)
            .await?
            .ok_or_else(|| {
                ApiError::Validation(ValidationError::UnknownReference {
                    field: "author".to_string(),
                    value: self.author.clone(),
                })
            })?;

        Ok(author)
    }
}

/// GET /api/books/
///
/// Supports filtering, search, and ordering through query parameters.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookQueryParams>,
) -> ApiResult<Json<Vec<BookResponse>>> {
    let query = BookQuery::parse(&params)?;
    let books = state.db.books().list(&query).await?;

    // One author fetch per distinct author would be better served by a
    // joined query; at catalog scale the simple loop is fine.
    let mut responses = Vec::with_capacity(books.len());
    for book in books {
        let author = require_author(&state, &book.author_id).await?;
        responses.push(BookResponse::from_parts(book, &author));
    }

    Ok(Json(responses))
}

/// GET /api/books/:id/
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookResponse>> {
    let book = state
        .db
        .books()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {}", id)))?;

    let author = require_author(&state, &book.author_id).await?;
    Ok(Json(BookResponse::from_parts(book, &author)))
}

/// POST /api/books/create/ (authenticated)
pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<BookPayload>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let author = payload.validate(&state).await?;

    let now = Utc::now();
    let book = Book {
        id: generate_book_id(),
        title: payload.title.trim().to_string(),
        publication_year: payload.publication_year,
        author_id: author.id.clone(),
        created_at: now,
        updated_at: now,
    };

    let inserted = state.db.books().insert(&book).await?;
    tracing::info!(book_id = %inserted.id, user = %user.username, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(BookResponse::from_parts(inserted, &author)),
    ))
}

/// PUT /api/books/:id/update/ (authenticated)
pub async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<Json<BookResponse>> {
    let author = payload.validate(&state).await?;

    let mut book = state
        .db
        .books()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book not found: {}", id)))?;

    book.title = payload.title.trim().to_string();
    book.publication_year = payload.publication_year;
    book.author_id = author.id.clone();

    state.db.books().update(&book).await?;
    tracing::info!(book_id = %book.id, user = %user.username, "Book updated");

    Ok(Json(BookResponse::from_parts(book, &author)))
}

/// DELETE /api/books/:id/delete/ (authenticated)
pub async fn delete(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.books().delete(&id).await?;
    tracing::info!(book_id = %id, user = %user.username, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Fetches a book's author, treating absence as an internal error.
///
/// The FK guarantees the author row exists whenever the book does.
async fn require_author(state: &AppState, author_id: &str) -> ApiResult<Author> {
    state
        .db
        .authors()
        .get_by_id(author_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("Author row missing: {}", author_id)))
}
