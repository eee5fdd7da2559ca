//! PostgreSQL implementation of the book repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Book, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    isbn: String,
    publisher: String,
    pub_year: i32,
    image_url: String,
    is_available: bool,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            row.id,
            row.title,
            row.author,
            row.isbn,
            row.publisher,
            row.pub_year,
            row.image_url,
            row.is_available,
        )
    }
}

const BOOK_COLUMNS: &str =
    "id, title, author, isbn, publisher, pub_year, image_url, is_available";

/// PostgreSQL repository for the catalog.
///
/// Availability transitions are single-statement compare-and-sets, so a
/// concurrent double reservation resolves at the database rather than in
/// application code.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let row: BookRow = sqlx::query_as(
            "INSERT INTO books (title, author, isbn, publisher, pub_year, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, author, isbn, publisher, pub_year, image_url, is_available",
        )
        .bind(new_book.title)
        .bind(new_book.author)
        .bind(new_book.isbn)
        .bind(new_book.publisher)
        .bind(new_book.pub_year)
        .bind(new_book.image_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, AppError> {
        let pattern = format!("%{}%", escape_like(query));

        let rows: Vec<BookRow> = sqlx::query_as(&format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE title ILIKE $1 OR author ILIKE $1 OR isbn ILIKE $1 \
             ORDER BY title"
        ))
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn try_reserve(&self, id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE books SET is_available = FALSE WHERE id = $1 AND is_available")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE books SET is_available = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
