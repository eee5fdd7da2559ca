//! Repository trait for catalog data access.

use crate::domain::entities::{Book, NewBook};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the book catalog.
///
/// Availability transitions go through [`try_reserve`](Self::try_reserve) and
/// [`release`](Self::release) only, so the "check availability, then mark
/// unavailable" step is a single atomic compare-and-set in storage and two
/// concurrent reservations on the same book cannot both win.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Adds a book to the catalog. New books start available.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a book by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Book))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Case-insensitive substring search over title, author and ISBN.
    ///
    /// The empty-query policy (no filter typed means no results) is enforced
    /// by the catalog service, not here.
    async fn search(&self, query: &str) -> Result<Vec<Book>, AppError>;

    /// Atomically claims an available book for a reservation.
    ///
    /// Returns `Ok(true)` when the book was available and is now marked
    /// unavailable, `Ok(false)` when it was already claimed (or unknown).
    async fn try_reserve(&self, id: i64) -> Result<bool, AppError>;

    /// Marks a book available again after its reservation ends or is
    /// administratively deleted.
    async fn release(&self, id: i64) -> Result<(), AppError>;

    /// Removes a book from the catalog.
    ///
    /// Returns `Ok(true)` if the book existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
