//! Reader registration and credential checks.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::domain::entities::{NewReader, Reader};
use crate::domain::repositories::ReaderRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Service for registering readers and verifying their credentials.
///
/// Sessions are somebody else's problem: this service only answers "is this
/// registration valid" and "does this password match".
pub struct ReaderService<R: ReaderRepository> {
    reader_repository: Arc<R>,
}

impl<R: ReaderRepository> ReaderService<R> {
    /// Creates a new reader service.
    pub fn new(reader_repository: Arc<R>) -> Self {
        Self { reader_repository }
    }

    /// Registers a reader with a unique email and an Argon2-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a malformed email, a password
    /// shorter than 8 characters, or an email that is already registered.
    pub async fn register(&self, new_reader: NewReader) -> Result<Reader, AppError> {
        new_reader.validate().map_err(|e| {
            AppError::validation("Invalid registration", json!({ "errors": e.to_string() }))
        })?;

        let email = new_reader.email.trim().to_lowercase();

        if self.reader_repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation(
                "Email already registered",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(&new_reader.password)?;

        let reader = match self.reader_repository.create(&email, &password_hash).await {
            Ok(reader) => reader,
            // Lost a race with another registration for the same email; the
            // unique constraint reports it as a conflict.
            Err(AppError::Conflict { .. }) => {
                return Err(AppError::validation(
                    "Email already registered",
                    json!({ "email": email }),
                ));
            }
            Err(e) => return Err(e),
        };

        info!(reader_id = reader.id, "reader registered");
        Ok(reader)
    }

    /// Checks an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a single message for both an
    /// unknown email and a wrong password, so callers cannot probe which
    /// emails are registered.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Reader, AppError> {
        let rejected =
            || AppError::validation("Invalid email or password", json!({}));

        let reader = self
            .reader_repository
            .find_by_email(email.trim().to_lowercase().as_str())
            .await?
            .ok_or_else(rejected)?;

        if !verify_password(password, &reader.password_hash)? {
            return Err(rejected());
        }

        Ok(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockReaderRepository;
    use rust_decimal::Decimal;

    fn test_reader(id: i64, email: &str, password_hash: &str) -> Reader {
        Reader::new(
            id,
            email.to_string(),
            false,
            Decimal::ZERO,
            password_hash.to_string(),
        )
    }

    fn registration(email: &str, password: &str) -> NewReader {
        NewReader {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut mock_repo = MockReaderRepository::new();

        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|email, hash| email == "reader@example.com" && hash.starts_with("$argon2"))
            .times(1)
            .returning(|email, hash| Ok(test_reader(1, email, hash)));

        let service = ReaderService::new(Arc::new(mock_repo));
        let reader = service
            .register(registration("Reader@Example.com", "long enough"))
            .await
            .unwrap();

        assert_eq!(reader.email, "reader@example.com");
        assert!(!reader.email_is_verified);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockReaderRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(test_reader(1, email, "$argon2id$stub"))));
        mock_repo.expect_create().times(0);

        let service = ReaderService::new(Arc::new(mock_repo));
        let result = service
            .register(registration("reader@example.com", "long enough"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let mut mock_repo = MockReaderRepository::new();
        mock_repo.expect_find_by_email().times(0);

        let service = ReaderService::new(Arc::new(mock_repo));
        let result = service
            .register(registration("reader@example.com", "abcd"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_race_maps_conflict_to_validation() {
        let mut mock_repo = MockReaderRepository::new();

        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo.expect_create().returning(|_, _| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "readers_email_key" }),
            ))
        });

        let service = ReaderService::new(Arc::new(mock_repo));
        let result = service
            .register(registration("reader@example.com", "long enough"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hash = hash_password("long enough").unwrap();
        let mut mock_repo = MockReaderRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(move |email| Ok(Some(test_reader(1, email, &hash))));

        let service = ReaderService::new(Arc::new(mock_repo));
        let reader = service
            .authenticate("reader@example.com", "long enough")
            .await
            .unwrap();

        assert_eq!(reader.id, 1);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = hash_password("long enough").unwrap();
        let mut mock_repo = MockReaderRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(move |email| Ok(Some(test_reader(1, email, &hash))));

        let service = ReaderService::new(Arc::new(mock_repo));
        let result = service
            .authenticate("reader@example.com", "not the password")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut mock_repo = MockReaderRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = ReaderService::new(Arc::new(mock_repo));
        let result = service
            .authenticate("nobody@example.com", "whatever password")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
