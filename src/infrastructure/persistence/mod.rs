//! PostgreSQL repository implementations.

pub mod pg_book_repository;
pub mod pg_checkout_repository;
pub mod pg_reader_repository;
pub mod pg_reservation_repository;

pub use pg_book_repository::PgBookRepository;
pub use pg_checkout_repository::PgCheckoutRepository;
pub use pg_reader_repository::PgReaderRepository;
pub use pg_reservation_repository::PgReservationRepository;
