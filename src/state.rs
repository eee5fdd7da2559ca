//! Shared application state wiring services over PostgreSQL repositories.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    AccountService, BalanceService, CatalogService, CirculationService, ReaderService,
    ReservationService, VerificationService,
};
use crate::config::Config;
use crate::infrastructure::mailer::NullMailer;
use crate::infrastructure::persistence::{
    PgBookRepository, PgCheckoutRepository, PgReaderRepository, PgReservationRepository,
};
use crate::infrastructure::token::HmacTokenIssuer;

/// Fully wired service graph over a shared connection pool.
///
/// Mail delivery is wired to [`NullMailer`]; an embedding application with a
/// real transport substitutes its own [`crate::domain::collaborators::Mailer`]
/// when constructing [`VerificationService`] directly.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService<PgBookRepository>>,
    pub reservations: Arc<ReservationService<PgReservationRepository, PgBookRepository>>,
    pub circulation: Arc<CirculationService<PgCheckoutRepository, PgBookRepository>>,
    pub balance: Arc<BalanceService<PgCheckoutRepository>>,
    pub accounts: Arc<AccountService<PgCheckoutRepository, PgReservationRepository>>,
    pub readers: Arc<ReaderService<PgReaderRepository>>,
    pub verification: Arc<VerificationService<PgReaderRepository, NullMailer, HmacTokenIssuer>>,
}

impl AppState {
    /// Builds the service graph from a pool and validated configuration.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let pool = Arc::new(pool);

        let book_repository = Arc::new(PgBookRepository::new(pool.clone()));
        let reader_repository = Arc::new(PgReaderRepository::new(pool.clone()));
        let reservation_repository = Arc::new(PgReservationRepository::new(pool.clone()));
        let checkout_repository = Arc::new(PgCheckoutRepository::new(pool));

        let balance = Arc::new(BalanceService::new(checkout_repository.clone()));

        Self {
            catalog: Arc::new(CatalogService::new(book_repository.clone())),
            reservations: Arc::new(ReservationService::new(
                reservation_repository.clone(),
                book_repository.clone(),
            )),
            circulation: Arc::new(CirculationService::new(
                checkout_repository.clone(),
                book_repository,
            )),
            accounts: Arc::new(AccountService::new(
                balance.clone(),
                checkout_repository,
                reservation_repository,
            )),
            balance,
            readers: Arc::new(ReaderService::new(reader_repository.clone())),
            verification: Arc::new(VerificationService::new(
                reader_repository,
                Arc::new(NullMailer::new()),
                Arc::new(HmacTokenIssuer::new(config.token_signing_secret.clone())),
                config.base_url.clone(),
            )),
        }
    }
}
