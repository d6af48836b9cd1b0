//! # Author Repository
//!
//! Database operations for authors.
//!
//! Deleting an author cascades to their books: the schema declares
//! `ON DELETE CASCADE` and the pool enables foreign-key enforcement,
//! so the policy lives entirely in the storage layer.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shelf_core::Author;

/// Repository for author database operations.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    /// Creates a new AuthorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuthorRepository { pool }
    }

    /// Lists all authors, sorted by name then id.
    pub async fn list(&self) -> DbResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM authors
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Gets an author by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Author))` - Author found
    /// * `Ok(None)` - Author not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM authors
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Inserts a new author.
    pub async fn insert(&self, author: &Author) -> DbResult<Author> {
        debug!(name = %author.name, "Inserting author");

        sqlx::query(
            r#"
            INSERT INTO authors (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(author.created_at)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(author.clone())
    }

    /// Updates an author's name.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Author doesn't exist
    pub async fn update(&self, author: &Author) -> DbResult<()> {
        debug!(id = %author.id, "Updating author");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE authors SET name = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", &author.id));
        }

        Ok(())
    }

    /// Deletes an author. Their books go with them (FK cascade).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Author doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting author");

        let result = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Author", id));
        }

        Ok(())
    }

    /// Counts authors (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new author ID.
pub fn generate_author_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shelf_core::Book;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn author(id: &str, name: &str) -> Author {
        let now = Utc::now();
        Author {
            id: id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_list_ordering() {
        let db = test_db().await;
        let authors = db.authors();

        authors.insert(&author("a2", "Stephen King")).await.unwrap();
        authors.insert(&author("a1", "J.K. Rowling")).await.unwrap();

        let all = authors.list().await.unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["J.K. Rowling", "Stephen King"]);
    }

    #[tokio::test]
    async fn test_update_name() {
        let db = test_db().await;
        let authors = db.authors();

        authors.insert(&author("a1", "J. Rowling")).await.unwrap();

        let mut a = authors.get_by_id("a1").await.unwrap().unwrap();
        a.name = "J.K. Rowling".to_string();
        authors.update(&a).await.unwrap();

        let reread = authors.get_by_id("a1").await.unwrap().unwrap();
        assert_eq!(reread.name, "J.K. Rowling");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_books() {
        let db = test_db().await;
        db.authors().insert(&author("a1", "J.K. Rowling")).await.unwrap();

        let now = Utc::now();
        db.books()
            .insert(&Book {
                id: "b1".to_string(),
                title: "Harry Potter and the Philosopher's Stone".to_string(),
                publication_year: 1997,
                author_id: "a1".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        db.authors().delete("a1").await.unwrap();

        assert!(db.books().get_by_id("b1").await.unwrap().is_none());
        assert_eq!(db.books().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        assert!(matches!(
            db.authors().delete("ghost").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
