//! Repository trait for the checkout and penalty ledger.

use crate::domain::entities::{CheckedOutBook, NewCheckout};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Outcome of one penalty settlement pass for a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Total applied to the balance this pass (zero or negative).
    pub applied: Decimal,
    /// Number of checkouts flipped to `is_counted` this pass.
    pub settled: u64,
    /// Reader balance after the pass.
    pub new_balance: Decimal,
}

/// Repository interface for checked-out books.
///
/// [`settle_penalties`](Self::settle_penalties) is the only writer of reader
/// balances. The PostgreSQL implementation runs the whole read-mark-apply
/// sequence under one transaction with row locks, so two concurrent
/// settlements for the same reader cannot count the same checkout twice.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCheckoutRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    /// Records a physical checkout.
    async fn create(&self, new_checkout: NewCheckout) -> Result<CheckedOutBook, AppError>;

    /// Finds a checkout by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<CheckedOutBook>, AppError>;

    /// Sets the actual return date and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    /// Returns [`AppError::Conflict`] when the checkout is already returned.
    async fn record_return(
        &self,
        id: i64,
        returned_on: NaiveDate,
    ) -> Result<CheckedOutBook, AppError>;

    /// A reader's returned checkouts (`end_date <= as_of`), newest first;
    /// the account view's checkout history.
    async fn list_returned_for_reader(
        &self,
        reader_id: i64,
        as_of: NaiveDate,
    ) -> Result<Vec<CheckedOutBook>, AppError>;

    /// Folds every uncounted penalty for the reader into their balance and
    /// marks those checkouts counted, all in one storage transaction.
    ///
    /// Idempotent: once every checkout is counted, further calls return a
    /// zero-application settlement without touching the balance.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown reader id.
    async fn settle_penalties(&self, reader_id: i64) -> Result<Settlement, AppError>;
}
