//! PostgreSQL implementation of the reservation repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewReservation, Reservation, ReservationFilter};
use crate::domain::repositories::ReservationRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    reader_id: i64,
    book_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
    should_remind: bool,
    note: Option<String>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation::new(
            row.id,
            row.reader_id,
            row.book_id,
            row.start_date,
            row.end_date,
            row.is_active,
            row.should_remind,
            row.note,
        )
    }
}

const RESERVATION_COLUMNS: &str =
    "id, reader_id, book_id, start_date, end_date, is_active, should_remind, note";

/// PostgreSQL repository for reservations.
///
/// `finish` and `delete` pair the reservation mutation with the book's
/// availability restore inside one transaction.
pub struct PgReservationRepository {
    pool: Arc<PgPool>,
}

impl PgReservationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create(&self, new_reservation: NewReservation) -> Result<Reservation, AppError> {
        let row: ReservationRow = sqlx::query_as(
            "INSERT INTO reservations \
             (reader_id, book_id, start_date, end_date, is_active, should_remind, note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, reader_id, book_id, start_date, end_date, is_active, should_remind, note",
        )
        .bind(new_reservation.reader_id)
        .bind(new_reservation.book_id)
        .bind(new_reservation.start_date)
        .bind(new_reservation.end_date)
        .bind(new_reservation.is_active)
        .bind(new_reservation.should_remind)
        .bind(new_reservation.note)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_reader(
        &self,
        reader_id: i64,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, AppError> {
        // The date range only applies when both ends are given, matching the
        // account-view filter semantics (window overlap, inclusive).
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE reader_id = $1 \
               AND ($2::date IS NULL OR $3::date IS NULL \
                    OR (start_date <= $3 AND end_date >= $2)) \
               AND (NOT $4 OR is_active) \
             ORDER BY start_date DESC, id DESC"
        ))
        .bind(reader_id)
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.only_active)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_expired_active(&self, today: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE is_active AND end_date < $1 \
             ORDER BY end_date"
        ))
        .bind(today)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn finish(&self, id: i64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<ReservationRow> = sqlx::query_as(
            "UPDATE reservations SET is_active = FALSE WHERE id = $1 \
             RETURNING id, reader_id, book_id, start_date, end_date, is_active, \
                       should_remind, note",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(AppError::not_found(
                "Reservation not found",
                json!({ "reservation_id": id }),
            ));
        };

        sqlx::query("UPDATE books SET is_available = TRUE WHERE id = $1")
            .bind(row.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let book_id: Option<i64> =
            sqlx::query_scalar("DELETE FROM reservations WHERE id = $1 RETURNING book_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(book_id) = book_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE books SET is_available = TRUE WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
