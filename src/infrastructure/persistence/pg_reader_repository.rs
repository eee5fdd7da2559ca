//! PostgreSQL implementation of the reader repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Reader;
use crate::domain::repositories::ReaderRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ReaderRow {
    id: i64,
    email: String,
    email_is_verified: bool,
    balance: Decimal,
    password_hash: String,
}

impl From<ReaderRow> for Reader {
    fn from(row: ReaderRow) -> Self {
        Reader::new(
            row.id,
            row.email,
            row.email_is_verified,
            row.balance,
            row.password_hash,
        )
    }
}

const READER_COLUMNS: &str = "id, email, email_is_verified, balance, password_hash";

/// PostgreSQL repository for reader accounts.
///
/// Email uniqueness is enforced by the `readers_email_key` constraint; a
/// violation surfaces as [`AppError::Conflict`] through `map_sqlx_error`.
pub struct PgReaderRepository {
    pool: Arc<PgPool>,
}

impl PgReaderRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReaderRepository for PgReaderRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Reader, AppError> {
        let row: ReaderRow = sqlx::query_as(
            "INSERT INTO readers (email, password_hash) \
             VALUES ($1, $2) \
             RETURNING id, email, email_is_verified, balance, password_hash",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reader>, AppError> {
        let row: Option<ReaderRow> =
            sqlx::query_as(&format!("SELECT {READER_COLUMNS} FROM readers WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Reader>, AppError> {
        let row: Option<ReaderRow> = sqlx::query_as(&format!(
            "SELECT {READER_COLUMNS} FROM readers WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn mark_email_verified(&self, id: i64) -> Result<Reader, AppError> {
        let row: Option<ReaderRow> = sqlx::query_as(
            "UPDATE readers SET email_is_verified = TRUE WHERE id = $1 \
             RETURNING id, email, email_is_verified, balance, password_hash",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Reader not found", json!({ "reader_id": id })))
    }
}
