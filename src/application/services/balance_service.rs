//! Balance reconciliation service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::repositories::{CheckoutRepository, Settlement};
use crate::error::AppError;

/// Service folding outstanding penalties into reader balances.
///
/// The actual read-mark-apply sequence is transactional inside
/// [`CheckoutRepository::settle_penalties`]; this service is the
/// application-facing entry point and the place the outcome gets logged.
pub struct BalanceService<C: CheckoutRepository> {
    checkout_repository: Arc<C>,
}

impl<C: CheckoutRepository> BalanceService<C> {
    /// Creates a new balance service.
    pub fn new(checkout_repository: Arc<C>) -> Self {
        Self {
            checkout_repository,
        }
    }

    /// Applies every uncounted penalty for the reader exactly once.
    ///
    /// Idempotent: a second call with no newly eligible checkouts settles
    /// nothing and leaves the balance untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown reader.
    pub async fn update_balance(&self, reader_id: i64) -> Result<Settlement, AppError> {
        let settlement = self.checkout_repository.settle_penalties(reader_id).await?;

        if settlement.settled > 0 {
            info!(
                reader_id,
                applied = %settlement.applied,
                settled = settlement.settled,
                new_balance = %settlement.new_balance,
                "penalties reconciled"
            );
        } else {
            debug!(reader_id, "no uncounted checkouts, balance unchanged");
            debug_assert_eq!(settlement.applied, Decimal::ZERO);
        }

        Ok(settlement)
    }
}
