//! Reservation lifecycle service.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{
    NewReservation, Reservation, ReservationFilter, MAX_RESERVATION_DAYS, MIN_RESERVATION_DAYS,
};
use crate::domain::repositories::{BookRepository, ReservationRepository};
use crate::error::AppError;

/// Input for creating a reservation.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub reader_id: i64,
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub duration_days: i64,
    pub should_remind: bool,
    pub note: Option<String>,
}

/// Service owning the reservation lifecycle.
///
/// Creation claims the book through the repository's atomic compare-and-set,
/// so two concurrent reservations on the same book resolve to one winner and
/// one [`AppError::Conflict`]. Ending a reservation is the sole path that
/// frees a book; it never fires on its own - the sweep in
/// [`Self::end_expired_reservations`] must be driven by an external
/// scheduler (see `src/main.rs`).
pub struct ReservationService<R: ReservationRepository, B: BookRepository> {
    reservation_repository: Arc<R>,
    book_repository: Arc<B>,
}

impl<R: ReservationRepository, B: BookRepository> ReservationService<R, B> {
    /// Creates a new reservation service.
    pub fn new(reservation_repository: Arc<R>, book_repository: Arc<B>) -> Self {
        Self {
            reservation_repository,
            book_repository,
        }
    }

    /// Creates a reservation starting today or later.
    ///
    /// Computes `end_date = start_date + duration_days` and caches
    /// `is_active = (start_date <= today <= end_date)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start_date` is in the past or
    /// `duration_days` is outside `[1, 5]`.
    /// Returns [`AppError::NotFound`] on an unknown book.
    /// Returns [`AppError::Conflict`] when the book is already reserved.
    pub async fn create(&self, request: ReservationRequest) -> Result<Reservation, AppError> {
        self.create_as_of(request, Utc::now().date_naive()).await
    }

    async fn create_as_of(
        &self,
        request: ReservationRequest,
        today: NaiveDate,
    ) -> Result<Reservation, AppError> {
        if request.start_date < today {
            return Err(AppError::validation(
                "Reservation cannot start in the past",
                json!({ "start_date": request.start_date, "today": today }),
            ));
        }

        if !(MIN_RESERVATION_DAYS..=MAX_RESERVATION_DAYS).contains(&request.duration_days) {
            return Err(AppError::validation(
                "Reservation duration out of bounds",
                json!({
                    "duration_days": request.duration_days,
                    "min": MIN_RESERVATION_DAYS,
                    "max": MAX_RESERVATION_DAYS,
                }),
            ));
        }

        if self
            .book_repository
            .find_by_id(request.book_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "book_id": request.book_id }),
            ));
        }

        if !self.book_repository.try_reserve(request.book_id).await? {
            return Err(AppError::conflict(
                "Book is not available",
                json!({ "book_id": request.book_id }),
            ));
        }

        let end_date = request.start_date + Duration::days(request.duration_days);
        let new_reservation = NewReservation {
            reader_id: request.reader_id,
            book_id: request.book_id,
            start_date: request.start_date,
            end_date,
            is_active: request.start_date <= today && today <= end_date,
            should_remind: request.should_remind,
            note: request.note,
        };

        match self.reservation_repository.create(new_reservation).await {
            Ok(reservation) => {
                info!(
                    reservation_id = reservation.id,
                    book_id = reservation.book_id,
                    "reservation created"
                );
                Ok(reservation)
            }
            Err(e) => {
                // Claim succeeded but the insert did not: give the book back.
                self.book_repository.release(request.book_id).await?;
                Err(e)
            }
        }
    }

    /// Ends a reservation whose window has passed.
    ///
    /// No-op (returns the unchanged reservation) while `end_date >= today`.
    /// Otherwise clears `is_active` and restores the book's availability.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    pub async fn end_reservation(&self, id: i64) -> Result<Reservation, AppError> {
        self.end_reservation_as_of(id, Utc::now().date_naive())
            .await
    }

    async fn end_reservation_as_of(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Reservation, AppError> {
        let reservation = self
            .reservation_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Reservation not found", json!({ "reservation_id": id }))
            })?;

        if !reservation.is_expired(today) {
            debug!(reservation_id = id, "reservation window not over, no-op");
            return Ok(reservation);
        }

        let ended = self.reservation_repository.finish(id).await?;
        info!(
            reservation_id = id,
            book_id = ended.book_id,
            "reservation ended, book released"
        );
        Ok(ended)
    }

    /// Sweeps every active reservation whose window has passed.
    ///
    /// Returns the number of reservations retired. Intended to be invoked
    /// periodically by a scheduler, not by request handling.
    pub async fn end_expired_reservations(&self) -> Result<u64, AppError> {
        self.end_expired_as_of(Utc::now().date_naive()).await
    }

    async fn end_expired_as_of(&self, today: NaiveDate) -> Result<u64, AppError> {
        let expired = self
            .reservation_repository
            .find_expired_active(today)
            .await?;

        let mut ended = 0u64;
        for reservation in expired {
            self.reservation_repository.finish(reservation.id).await?;
            ended += 1;
        }

        if ended > 0 {
            info!(count = ended, "expired reservations swept");
        }
        Ok(ended)
    }

    /// Administratively deletes a reservation, restoring the book's
    /// availability as part of the same repository transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.reservation_repository.delete(id).await? {
            return Err(AppError::not_found(
                "Reservation not found",
                json!({ "reservation_id": id }),
            ));
        }
        info!(reservation_id = id, "reservation deleted");
        Ok(())
    }

    /// Lists a reader's reservations with the account-view filter.
    pub async fn list_for_reader(
        &self,
        reader_id: i64,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, AppError> {
        self.reservation_repository
            .list_for_reader(reader_id, filter)
            .await
    }
}
