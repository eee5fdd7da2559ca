//! Repository trait for reader account data access.

use crate::domain::entities::Reader;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered readers.
///
/// Balance mutation deliberately has no method here: penalties reach the
/// balance only through
/// [`crate::domain::repositories::CheckoutRepository::settle_penalties`],
/// which owns the transactional read-mark-apply sequence.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReaderRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReaderRepository: Send + Sync {
    /// Creates a reader with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already registered
    /// (unique constraint). The reader service turns that into a
    /// [`AppError::Validation`] for the caller.
    async fn create(&self, email: &str, password_hash: &str) -> Result<Reader, AppError>;

    /// Finds a reader by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Reader>, AppError>;

    /// Finds a reader by email (the identity key).
    async fn find_by_email(&self, email: &str) -> Result<Option<Reader>, AppError>;

    /// Flips `email_is_verified` and returns the updated reader.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    async fn mark_email_verified(&self, id: i64) -> Result<Reader, AppError>;
}
