//! Application services orchestrating domain operations.
//!
//! Services hold `Arc`s to repository/collaborator traits, keep the business
//! rules, and leave storage atomicity to the repository implementations.
//!
//! - [`CatalogService`] - search and catalog maintenance
//! - [`ReservationService`] - reservation lifecycle and the expiry sweep
//! - [`CirculationService`] - checkouts and returns
//! - [`BalanceService`] - penalty reconciliation
//! - [`AccountService`] - account statement assembly
//! - [`ReaderService`] - registration and credential checks
//! - [`VerificationService`] - email confirmation flow

pub mod account_service;
pub mod balance_service;
pub mod catalog_service;
pub mod circulation_service;
pub mod reader_service;
pub mod reservation_service;
pub mod verification_service;

pub use account_service::{AccountService, AccountStatement, CheckoutLine};
pub use balance_service::BalanceService;
pub use catalog_service::CatalogService;
pub use circulation_service::CirculationService;
pub use reader_service::ReaderService;
pub use reservation_service::{ReservationRequest, ReservationService};
pub use verification_service::VerificationService;
