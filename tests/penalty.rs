//! Penalty math and date-window behavior through the public API.

use chrono::NaiveDate;
use librarium::domain::entities::{CheckedOutBook, Reservation, PENALTY_PER_DAY};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn checkout(due: NaiveDate, end: Option<NaiveDate>) -> CheckedOutBook {
    CheckedOutBook::new(1, 2, 3, date(2024, 1, 1), due, end, false, false)
}

#[test]
fn three_days_overdue_costs_six() {
    let c = checkout(date(2024, 1, 10), Some(date(2024, 1, 13)));
    assert_eq!(c.penalty(), dec!(-6.00));
}

#[test]
fn early_return_costs_nothing() {
    let c = checkout(date(2024, 1, 10), Some(date(2024, 1, 8)));
    assert_eq!(c.penalty(), dec!(0.00));
}

#[test]
fn outstanding_checkout_costs_nothing_yet() {
    let c = checkout(date(2024, 1, 10), None);
    assert_eq!(c.penalty(), dec!(0.00));
}

#[test]
fn penalty_is_exactly_rate_times_days() {
    for days in 1i64..=30 {
        let end = date(2024, 1, 10) + chrono::Duration::days(days);
        let c = checkout(date(2024, 1, 10), Some(end));
        assert_eq!(c.penalty(), -(rust_decimal::Decimal::from(days) * PENALTY_PER_DAY));
    }
}

#[test]
fn penalty_crosses_month_boundaries_in_whole_days() {
    let c = checkout(date(2024, 1, 31), Some(date(2024, 2, 2)));
    assert_eq!(c.penalty(), dec!(-4.00));
}

#[test]
fn reservation_window_is_inclusive() {
    let r = Reservation::new(
        1,
        2,
        3,
        date(2024, 5, 1),
        date(2024, 5, 4),
        true,
        true,
        Some("pick up at the front desk".to_string()),
    );

    assert!(r.is_current(date(2024, 5, 1)));
    assert!(r.is_current(date(2024, 5, 4)));
    assert!(!r.is_current(date(2024, 4, 30)));
    assert!(!r.is_expired(date(2024, 5, 4)));
    assert!(r.is_expired(date(2024, 5, 5)));
}
