//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures of the library core.
//! Entities are plain data apart from the date-window and penalty logic that
//! is pure computation over their own fields.
//!
//! # Entity Types
//!
//! - [`Book`] - A catalog record with an availability flag
//! - [`Reader`] - A registered account with a monetary balance
//! - [`Reservation`] - A reader holding a book over a date window
//! - [`CheckedOutBook`] - A physical checkout with due-date and penalty state
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewBook`, `NewReader`, `NewReservation`, `NewCheckout`.

pub mod book;
pub mod checkout;
pub mod reader;
pub mod reservation;

pub use book::{Book, NewBook};
pub use checkout::{CheckedOutBook, NewCheckout, PENALTY_PER_DAY};
pub use reader::{NewReader, Reader};
pub use reservation::{
    NewReservation, Reservation, ReservationFilter, MAX_RESERVATION_DAYS, MIN_RESERVATION_DAYS,
};
