//! PostgreSQL implementation of the checkout repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CheckedOutBook, NewCheckout};
use crate::domain::repositories::{CheckoutRepository, Settlement};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CheckoutRow {
    id: i64,
    reader_id: i64,
    book_id: i64,
    start_date: NaiveDate,
    due_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_penalty_paid: bool,
    is_counted: bool,
}

impl From<CheckoutRow> for CheckedOutBook {
    fn from(row: CheckoutRow) -> Self {
        CheckedOutBook::new(
            row.id,
            row.reader_id,
            row.book_id,
            row.start_date,
            row.due_date,
            row.end_date,
            row.is_penalty_paid,
            row.is_counted,
        )
    }
}

const CHECKOUT_COLUMNS: &str =
    "id, reader_id, book_id, start_date, due_date, end_date, is_penalty_paid, is_counted";

/// PostgreSQL repository for the checkout ledger.
///
/// `settle_penalties` runs the whole read-mark-apply sequence inside one
/// transaction with `FOR UPDATE` row locks: a concurrent settlement for the
/// same reader blocks on the locks and then finds nothing left uncounted.
pub struct PgCheckoutRepository {
    pool: Arc<PgPool>,
}

impl PgCheckoutRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckoutRepository for PgCheckoutRepository {
    async fn create(&self, new_checkout: NewCheckout) -> Result<CheckedOutBook, AppError> {
        let row: CheckoutRow = sqlx::query_as(
            "INSERT INTO checked_out_books (reader_id, book_id, start_date, due_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, reader_id, book_id, start_date, due_date, end_date, \
                       is_penalty_paid, is_counted",
        )
        .bind(new_checkout.reader_id)
        .bind(new_checkout.book_id)
        .bind(new_checkout.start_date)
        .bind(new_checkout.due_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CheckedOutBook>, AppError> {
        let row: Option<CheckoutRow> = sqlx::query_as(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checked_out_books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn record_return(
        &self,
        id: i64,
        returned_on: NaiveDate,
    ) -> Result<CheckedOutBook, AppError> {
        let row: Option<CheckoutRow> = sqlx::query_as(
            "UPDATE checked_out_books SET end_date = $2 \
             WHERE id = $1 AND end_date IS NULL \
             RETURNING id, reader_id, book_id, start_date, due_date, end_date, \
                       is_penalty_paid, is_counted",
        )
        .bind(id)
        .bind(returned_on)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // Distinguish "already returned" from "no such checkout".
        match self.find_by_id(id).await? {
            Some(existing) => Err(AppError::conflict(
                "Book already returned",
                json!({ "checkout_id": id, "end_date": existing.end_date }),
            )),
            None => Err(AppError::not_found(
                "Checkout not found",
                json!({ "checkout_id": id }),
            )),
        }
    }

    async fn list_returned_for_reader(
        &self,
        reader_id: i64,
        as_of: NaiveDate,
    ) -> Result<Vec<CheckedOutBook>, AppError> {
        let rows: Vec<CheckoutRow> = sqlx::query_as(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checked_out_books \
             WHERE reader_id = $1 AND end_date IS NOT NULL AND end_date <= $2 \
             ORDER BY end_date DESC, id DESC"
        ))
        .bind(reader_id)
        .bind(as_of)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn settle_penalties(&self, reader_id: i64) -> Result<Settlement, AppError> {
        let mut tx = self.pool.begin().await?;

        let balance: Option<Decimal> =
            sqlx::query_scalar("SELECT balance FROM readers WHERE id = $1 FOR UPDATE")
                .bind(reader_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(balance) = balance else {
            return Err(AppError::not_found(
                "Reader not found",
                json!({ "reader_id": reader_id }),
            ));
        };

        let rows: Vec<CheckoutRow> = sqlx::query_as(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checked_out_books \
             WHERE reader_id = $1 AND NOT is_counted \
             FOR UPDATE"
        ))
        .bind(reader_id)
        .fetch_all(&mut *tx)
        .await?;

        if rows.is_empty() {
            tx.commit().await?;
            return Ok(Settlement {
                applied: Decimal::ZERO,
                settled: 0,
                new_balance: balance,
            });
        }

        let settled = rows.len() as u64;
        let applied: Decimal = rows
            .into_iter()
            .map(|row| CheckedOutBook::from(row).penalty())
            .sum();

        sqlx::query(
            "UPDATE checked_out_books SET is_counted = TRUE \
             WHERE reader_id = $1 AND NOT is_counted",
        )
        .bind(reader_id)
        .execute(&mut *tx)
        .await?;

        let new_balance: Decimal =
            sqlx::query_scalar("UPDATE readers SET balance = balance + $2 WHERE id = $1 RETURNING balance")
                .bind(reader_id)
                .bind(applied)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Settlement {
            applied,
            settled,
            new_balance,
        })
    }
}
