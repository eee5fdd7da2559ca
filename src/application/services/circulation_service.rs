//! Checkout ledger service: physical pickups and returns.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use crate::domain::entities::{CheckedOutBook, NewCheckout};
use crate::domain::repositories::{BookRepository, CheckoutRepository};
use crate::error::AppError;

/// Service recording checkouts and returns.
///
/// A checkout is created by staff converting a reservation into physical
/// possession; the book was already claimed when the reservation was made,
/// so no availability transition happens here. Penalty math lives on
/// [`CheckedOutBook::penalty`] and is consumed by balance reconciliation.
pub struct CirculationService<C: CheckoutRepository, B: BookRepository> {
    checkout_repository: Arc<C>,
    book_repository: Arc<B>,
}

impl<C: CheckoutRepository, B: BookRepository> CirculationService<C, B> {
    /// Creates a new circulation service.
    pub fn new(checkout_repository: Arc<C>, book_repository: Arc<B>) -> Self {
        Self {
            checkout_repository,
            book_repository,
        }
    }

    /// Records a checkout window from pickup to required return.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `due_date` precedes `start_date`.
    /// Returns [`AppError::NotFound`] on an unknown book.
    pub async fn check_out(&self, new_checkout: NewCheckout) -> Result<CheckedOutBook, AppError> {
        if new_checkout.due_date < new_checkout.start_date {
            return Err(AppError::validation(
                "Due date precedes checkout date",
                json!({
                    "start_date": new_checkout.start_date,
                    "due_date": new_checkout.due_date,
                }),
            ));
        }

        if self
            .book_repository
            .find_by_id(new_checkout.book_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "book_id": new_checkout.book_id }),
            ));
        }

        let checkout = self.checkout_repository.create(new_checkout).await?;
        info!(
            checkout_id = checkout.id,
            book_id = checkout.book_id,
            due_date = %checkout.due_date,
            "book checked out"
        );
        Ok(checkout)
    }

    /// Records the actual return date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the return date precedes pickup.
    /// Returns [`AppError::NotFound`] on an unknown checkout.
    /// Returns [`AppError::Conflict`] when the book was already returned.
    pub async fn return_book(
        &self,
        id: i64,
        returned_on: NaiveDate,
    ) -> Result<CheckedOutBook, AppError> {
        let checkout = self
            .checkout_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Checkout not found", json!({ "checkout_id": id }))
            })?;

        if checkout.is_returned() {
            return Err(AppError::conflict(
                "Book already returned",
                json!({ "checkout_id": id, "end_date": checkout.end_date }),
            ));
        }

        if returned_on < checkout.start_date {
            return Err(AppError::validation(
                "Return date precedes checkout date",
                json!({ "returned_on": returned_on, "start_date": checkout.start_date }),
            ));
        }

        let updated = self.checkout_repository.record_return(id, returned_on).await?;
        info!(
            checkout_id = id,
            returned_on = %returned_on,
            penalty = %updated.penalty(),
            "book returned"
        );
        Ok(updated)
    }
}
