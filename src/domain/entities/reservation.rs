//! Reservation entity: a reader holding a book for a bounded date window.

use chrono::NaiveDate;
use serde::Serialize;

/// Allowed reservation length in days, inclusive on both ends.
pub const MIN_RESERVATION_DAYS: i64 = 1;
pub const MAX_RESERVATION_DAYS: i64 = 5;

/// A reservation of a book by a reader over an inclusive date window.
///
/// Invariant: `start_date <= end_date`.
///
/// `is_active` is a cached snapshot of [`Reservation::is_current`] taken at
/// creation and refreshed only by the end-reservation operation; nothing
/// updates it on a clock tick. The sweep in
/// [`crate::application::services::ReservationService::end_expired_reservations`]
/// is the path that retires stale reservations.
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub id: i64,
    pub reader_id: i64,
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub should_remind: bool,
    pub note: Option<String>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        reader_id: i64,
        book_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_active: bool,
        should_remind: bool,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            reader_id,
            book_id,
            start_date,
            end_date,
            is_active,
            should_remind,
            note,
        }
    }

    /// Returns true when `today` falls inside the inclusive window.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }

    /// Returns true once the window lies entirely in the past.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

/// Input data for creating a reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub reader_id: i64,
    pub book_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub should_remind: bool,
    pub note: Option<String>,
}

/// Filter for listing a reader's reservations on the account view.
///
/// `from`/`to` select reservations whose window overlaps the given range,
/// mirroring `start_date <= to AND end_date >= from`.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub only_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation::new(1, 2, 3, start, end, true, true, None)
    }

    #[test]
    fn test_is_current_inside_window() {
        let r = reservation(date(2024, 1, 10), date(2024, 1, 15));
        assert!(r.is_current(date(2024, 1, 10)));
        assert!(r.is_current(date(2024, 1, 12)));
        assert!(r.is_current(date(2024, 1, 15)));
    }

    #[test]
    fn test_is_current_outside_window() {
        let r = reservation(date(2024, 1, 10), date(2024, 1, 15));
        assert!(!r.is_current(date(2024, 1, 9)));
        assert!(!r.is_current(date(2024, 1, 16)));
    }

    #[test]
    fn test_is_expired_only_after_end_date() {
        let r = reservation(date(2024, 1, 10), date(2024, 1, 15));
        assert!(!r.is_expired(date(2024, 1, 15)));
        assert!(r.is_expired(date(2024, 1, 16)));
    }
}
