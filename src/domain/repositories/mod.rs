//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`BookRepository`] - Catalog CRUD, search and availability transitions
//! - [`ReaderRepository`] - Account lookup, registration and verification state
//! - [`ReservationRepository`] - Reservation lifecycle
//! - [`CheckoutRepository`] - Checkout ledger and penalty settlement

pub mod book_repository;
pub mod checkout_repository;
pub mod reader_repository;
pub mod reservation_repository;

pub use book_repository::BookRepository;
pub use checkout_repository::{CheckoutRepository, Settlement};
pub use reader_repository::ReaderRepository;
pub use reservation_repository::ReservationRepository;

#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use checkout_repository::MockCheckoutRepository;
#[cfg(test)]
pub use reader_repository::MockReaderRepository;
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
