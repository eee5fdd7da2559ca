//! Repository trait for reservation data access.

use crate::domain::entities::{NewReservation, Reservation, ReservationFilter};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface for reservations.
///
/// The operations that touch both a reservation and its book
/// ([`finish`](Self::finish), [`delete`](Self::delete)) run as one storage
/// transaction in the PostgreSQL implementation, so a book can never end up
/// stuck unavailable because only half of the transition landed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReservationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists a new reservation. The book must already be claimed via
    /// [`crate::domain::repositories::BookRepository::try_reserve`].
    async fn create(&self, new_reservation: NewReservation) -> Result<Reservation, AppError>;

    /// Finds a reservation by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;

    /// Lists a reader's reservations, newest window first.
    ///
    /// `filter.from`/`filter.to` keep reservations whose window overlaps the
    /// range; `filter.only_active` keeps the active ones.
    async fn list_for_reader(
        &self,
        reader_id: i64,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, AppError>;

    /// Active reservations whose `end_date` is before `today`; the sweep's
    /// work list.
    async fn find_expired_active(&self, today: NaiveDate) -> Result<Vec<Reservation>, AppError>;

    /// Retires a reservation: clears `is_active` and restores the book's
    /// availability in the same transaction. Returns the updated reservation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    async fn finish(&self, id: i64) -> Result<Reservation, AppError>;

    /// Administrative delete with the compensating availability restore in
    /// the same transaction. Returns `Ok(true)` if the reservation existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
