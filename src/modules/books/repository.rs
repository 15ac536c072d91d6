//! Storage operations for the books module.
//!
//! Each mutating operation runs inside a scoped `sqlx` transaction: the
//! transaction rolls back when dropped unless `commit` is reached, so no
//! error path can leave partial state behind.

use sqlx::SqlitePool;

use super::models::{Book, NewBook};

const BOOK_COLUMNS: &str = "id, title, author, rating, price, created_at, updated_at, deleted_at";

/// Repository over the shared SQLite pool. Cloning is cheap; the pool is
/// reference-counted internally.
#[derive(Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch all live books in storage-default order.
    pub async fn list(&self) -> Result<Vec<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE deleted_at IS NULL"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Fetch the live book with the given id; `None` when no row matches.
    pub async fn get(&self, id: u32) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new book and return the stored row with server-assigned id
    /// and timestamps.
    pub async fn create(&self, input: NewBook) -> Result<Book, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, author, rating, price) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.author)
        .bind(input.rating)
        .bind(input.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(book)
    }

    /// Soft-delete the live book with the given id.
    ///
    /// Returns `None` without touching the row when no live record exists —
    /// the existence check and the tombstone update share one transaction,
    /// so a partial soft-delete is never observable.
    pub async fn delete(&self, id: u32) -> Result<Option<Book>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Ok(None);
        }

        let book = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?1 RETURNING {BOOK_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(book))
    }
}
