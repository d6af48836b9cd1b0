//! # Book Repository
//!
//! Database operations for books, including the listing query that backs
//! the filter/search/order endpoint.
//!
//! ## How a BookQuery Becomes SQL
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookQuery {                                                           │
//! │      title_contains: Some("harry"),                                    │
//! │      year_min: Some(1997),                                             │
//! │      ordering: [publication_year DESC, id ASC],                        │
//! │  }                                                                     │
//! │       │                                                                 │
//! │       ▼  QueryBuilder                                                   │
//! │  SELECT b.* FROM books b                                               │
//! │  INNER JOIN authors a ON a.id = b.author_id                            │
//! │  WHERE 1 = 1                                                           │
//! │    AND instr(lower(b.title), lower(?1)) > 0                            │
//! │    AND b.publication_year >= ?2                                        │
//! │  ORDER BY b.publication_year DESC, b.id ASC                            │
//! │                                                                         │
//! │  Every filter value is a bound parameter; ORDER BY fragments come      │
//! │  from a fixed enum, never from raw caller input.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shelf_core::{Book, BookQuery, OrderField, OrderKey};

/// Columns selected for every book read, aliased to the joined query.
const BOOK_COLUMNS: &str =
    "b.id, b.title, b.publication_year, b.author_id, b.created_at, b.updated_at";

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BookRepository::new(pool);
///
/// let results = repo.list(&query).await?;
/// let book = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Lists books matching the query's filters, in the query's ordering.
    ///
    /// ## How It Works
    /// 1. Always joins authors, so author-name filters and ordering work
    /// 2. Each present filter appends one AND predicate with a bound value
    /// 3. The ordering keys (a fixed enum) become the ORDER BY clause
    ///
    /// An empty result is a valid, non-error outcome.
    pub async fn list(&self, query: &BookQuery) -> DbResult<Vec<Book>> {
        debug!(?query, "Listing books");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {BOOK_COLUMNS} FROM books b \
             INNER JOIN authors a ON a.id = b.author_id \
             WHERE 1 = 1"
        ));

        if let Some(title) = &query.title_contains {
            qb.push(" AND instr(lower(b.title), lower(");
            qb.push_bind(title.clone());
            qb.push(")) > 0");
        }

        if let Some(author_id) = &query.author_id {
            qb.push(" AND b.author_id = ");
            qb.push_bind(author_id.clone());
        }

        if let Some(name) = &query.author_name_contains {
            qb.push(" AND instr(lower(a.name), lower(");
            qb.push_bind(name.clone());
            qb.push(")) > 0");
        }

        if let Some(year) = query.year {
            qb.push(" AND b.publication_year = ");
            qb.push_bind(year);
        }

        if let Some(year_min) = query.year_min {
            qb.push(" AND b.publication_year >= ");
            qb.push_bind(year_min);
        }

        if let Some(year_max) = query.year_max {
            qb.push(" AND b.publication_year <= ");
            qb.push_bind(year_max);
        }

        if let Some(term) = &query.search {
            qb.push(" AND (instr(lower(b.title), lower(");
            qb.push_bind(term.clone());
            qb.push(")) > 0 OR instr(lower(a.name), lower(");
            qb.push_bind(term.clone());
            qb.push(")) > 0)");
        }

        qb.push(" ORDER BY ");
        let mut separated = qb.separated(", ");
        for key in &query.ordering {
            separated.push(order_clause(key));
        }

        let books = qb
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = books.len(), "Listing returned books");
        Ok(books)
    }

    /// Lists all books by one author, newest first.
    ///
    /// Used to assemble the nested `books` field of author responses.
    pub async fn list_by_author(&self, author_id: &str) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, publication_year, author_id, created_at, updated_at
            FROM books
            WHERE author_id = ?1
            ORDER BY publication_year DESC, title ASC, id ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, publication_year, author_id, created_at, updated_at
            FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Inserts a new book.
    ///
    /// ## Returns
    /// * `Ok(Book)` - Inserted book
    /// * `Err(DbError::ForeignKeyViolation)` - author_id doesn't exist
    pub async fn insert(&self, book: &Book) -> DbResult<Book> {
        debug!(title = %book.title, "Inserting book");

        sqlx::query(
            r#"
            INSERT INTO books (id, title, publication_year, author_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(&book.author_id)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(book.clone())
    }

    /// Updates an existing book.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Book doesn't exist
    pub async fn update(&self, book: &Book) -> DbResult<()> {
        debug!(id = %book.id, "Updating book");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = ?2,
                publication_year = ?3,
                author_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(&book.author_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", &book.id));
        }

        Ok(())
    }

    /// Deletes a book.
    ///
    /// ## Returns
    /// * `Ok(())` - Delete successful
    /// * `Err(DbError::NotFound)` - Book doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    /// Counts books (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// SQL fragment for one ordering key.
///
/// Fragments are fixed strings selected by enum match: caller input never
/// reaches the ORDER BY clause directly.
fn order_clause(key: &OrderKey) -> &'static str {
    match (key.field, key.descending) {
        (OrderField::Title, false) => "b.title ASC",
        (OrderField::Title, true) => "b.title DESC",
        (OrderField::PublicationYear, false) => "b.publication_year ASC",
        (OrderField::PublicationYear, true) => "b.publication_year DESC",
        (OrderField::AuthorName, false) => "a.name ASC",
        (OrderField::AuthorName, true) => "a.name DESC",
        (OrderField::Id, false) => "b.id ASC",
        (OrderField::Id, true) => "b.id DESC",
    }
}

/// Helper to generate a new book ID.
pub fn generate_book_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
