//! Checked-out book entity and overdue penalty math.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Penalty charged per whole day overdue, in currency units.
pub const PENALTY_PER_DAY: Decimal = Decimal::from_parts(200, 0, 0, false, 2);

/// A physical checkout of a book by a reader.
///
/// Invariant: `start_date <= due_date`. `end_date` is the actual return date
/// and stays `None` while the book is outstanding; it may land before or
/// after `due_date`.
///
/// `is_counted` guarantees the penalty is folded into the reader's balance at
/// most once: reconciliation flips it inside the same storage transaction
/// that applies the penalty.
#[derive(Debug, Clone, Serialize)]
pub struct CheckedOutBook {
    pub id: i64,
    pub reader_id: i64,
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_penalty_paid: bool,
    pub is_counted: bool,
}

impl CheckedOutBook {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        reader_id: i64,
        book_id: i64,
        start_date: NaiveDate,
        due_date: NaiveDate,
        end_date: Option<NaiveDate>,
        is_penalty_paid: bool,
        is_counted: bool,
    ) -> Self {
        Self {
            id,
            reader_id,
            book_id,
            start_date,
            due_date,
            end_date,
            is_penalty_paid,
            is_counted,
        }
    }

    /// Computes the overdue penalty as a debit (zero or negative).
    ///
    /// Pure function of `end_date` and `due_date`: `0.00` while the book is
    /// outstanding or was returned on time, otherwise
    /// `-(days_overdue * PENALTY_PER_DAY)` with no cap. The value is never
    /// stored; reconciliation consumes it lazily.
    pub fn penalty(&self) -> Decimal {
        match self.end_date {
            Some(end) if end > self.due_date => {
                let days_overdue = (end - self.due_date).num_days();
                -(Decimal::from(days_overdue) * PENALTY_PER_DAY)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Returns true once the book has been returned.
    pub fn is_returned(&self) -> bool {
        self.end_date.is_some()
    }
}

/// Input data for recording a checkout.
#[derive(Debug, Clone)]
pub struct NewCheckout {
    pub reader_id: i64,
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
}
