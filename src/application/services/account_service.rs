//! Account view assembly: balance, reservations and checkout history.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entities::{CheckedOutBook, Reservation, ReservationFilter};
use crate::domain::repositories::{CheckoutRepository, ReservationRepository};
use crate::error::AppError;

use super::BalanceService;

/// One returned checkout with its computed penalty, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutLine {
    pub checkout: CheckedOutBook,
    pub penalty: Decimal,
}

/// The data contract handed to whatever renders the account page.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatement {
    pub balance: Decimal,
    pub reservations: Vec<Reservation>,
    pub checkouts: Vec<CheckoutLine>,
}

/// Service assembling a reader's account statement.
///
/// Viewing the account is also the moment outstanding penalties get folded
/// into the balance: the statement always starts with a reconciliation pass,
/// so the balance shown is never stale.
pub struct AccountService<C: CheckoutRepository, R: ReservationRepository> {
    balance_service: Arc<BalanceService<C>>,
    checkout_repository: Arc<C>,
    reservation_repository: Arc<R>,
}

impl<C: CheckoutRepository, R: ReservationRepository> AccountService<C, R> {
    /// Creates a new account service.
    pub fn new(
        balance_service: Arc<BalanceService<C>>,
        checkout_repository: Arc<C>,
        reservation_repository: Arc<R>,
    ) -> Self {
        Self {
            balance_service,
            checkout_repository,
            reservation_repository,
        }
    }

    /// Builds the account statement for a reader.
    ///
    /// Reconciles the balance, then lists reservations (through the optional
    /// date-range/only-active filter) and returned checkouts with their
    /// penalties.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown reader.
    pub async fn statement(
        &self,
        reader_id: i64,
        filter: &ReservationFilter,
    ) -> Result<AccountStatement, AppError> {
        self.statement_as_of(reader_id, filter, Utc::now().date_naive())
            .await
    }

    async fn statement_as_of(
        &self,
        reader_id: i64,
        filter: &ReservationFilter,
        today: NaiveDate,
    ) -> Result<AccountStatement, AppError> {
        let settlement = self.balance_service.update_balance(reader_id).await?;

        let reservations = self
            .reservation_repository
            .list_for_reader(reader_id, filter)
            .await?;

        let checkouts = self
            .checkout_repository
            .list_returned_for_reader(reader_id, today)
            .await?
            .into_iter()
            .map(|checkout| CheckoutLine {
                penalty: checkout.penalty(),
                checkout,
            })
            .collect();

        Ok(AccountStatement {
            balance: settlement.new_balance,
            reservations,
            checkouts,
        })
    }
}
