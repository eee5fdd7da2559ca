//! Email verification flow: token issue, mail dispatch, confirmation.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use tracing::info;

use crate::domain::collaborators::{Mailer, TokenIssuer};
use crate::domain::entities::Reader;
use crate::domain::repositories::ReaderRepository;
use crate::error::AppError;

const VERIFY_SUBJECT: &str = "Verify Email";

/// Service driving the token-based email confirmation flow.
///
/// The token binds the reader's verification flag, so a link issued before
/// confirmation stops validating once the flag flips; nothing about issued
/// tokens is stored. Invalid links surface as [`AppError::Validation`] - a
/// user-visible warning, never a failed request.
pub struct VerificationService<R: ReaderRepository, M: Mailer, T: TokenIssuer> {
    reader_repository: Arc<R>,
    mailer: Arc<M>,
    token_issuer: Arc<T>,
    /// Site base for confirmation links, e.g. `https://library.example.com`.
    base_url: String,
}

impl<R: ReaderRepository, M: Mailer, T: TokenIssuer> VerificationService<R, M, T> {
    /// Creates a new verification service.
    pub fn new(
        reader_repository: Arc<R>,
        mailer: Arc<M>,
        token_issuer: Arc<T>,
        base_url: String,
    ) -> Self {
        Self {
            reader_repository,
            mailer,
            token_issuer,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issues a token and mails the confirmation link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown reader.
    /// Returns [`AppError::Conflict`] when the email is already verified.
    /// Mailer failures propagate as [`AppError::Internal`].
    pub async fn send_verification(&self, reader_id: i64) -> Result<(), AppError> {
        let reader = self.get_reader(reader_id).await?;

        if reader.email_is_verified {
            return Err(AppError::conflict(
                "Email already verified",
                json!({ "reader_id": reader_id }),
            ));
        }

        let token = self.token_issuer.issue(&reader);
        let uid = URL_SAFE_NO_PAD.encode(reader.id.to_string());
        let link = format!("{}/library/verify-email-confirm/{}/{}", self.base_url, uid, token);

        let body = format!(
            "<p>Hello {},</p>\
             <p>Please click the link below to confirm your email address:</p>\
             <p><a href=\"{link}\">{link}</a></p>",
            reader.email
        );

        self.mailer.send(VERIFY_SUBJECT, &body, &reader.email).await?;
        info!(reader_id, "verification email sent");
        Ok(())
    }

    /// Confirms a `(uid, token)` pair from a verification link.
    ///
    /// The uid is the URL-safe base64 reader id as embedded by
    /// [`Self::send_verification`]. Any malformed uid, unknown reader or
    /// stale token yields the same "link is invalid" validation error.
    pub async fn confirm(&self, uid: &str, token: &str) -> Result<Reader, AppError> {
        let invalid = || AppError::validation("The link is invalid", json!({}));

        let reader_id: i64 = URL_SAFE_NO_PAD
            .decode(uid)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;

        let reader = self
            .reader_repository
            .find_by_id(reader_id)
            .await?
            .ok_or_else(invalid)?;

        if !self.token_issuer.validate(&reader, token) {
            return Err(invalid());
        }

        let verified = self.reader_repository.mark_email_verified(reader_id).await?;
        info!(reader_id, "email verified");
        Ok(verified)
    }

    async fn get_reader(&self, reader_id: i64) -> Result<Reader, AppError> {
        self.reader_repository
            .find_by_id(reader_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Reader not found", json!({ "reader_id": reader_id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collaborators::{MockMailer, MockTokenIssuer};
    use crate::domain::repositories::MockReaderRepository;
    use rust_decimal::Decimal;

    fn test_reader(id: i64, verified: bool) -> Reader {
        Reader::new(
            id,
            "reader@example.com".to_string(),
            verified,
            Decimal::ZERO,
            "$argon2id$stub".to_string(),
        )
    }

    fn service(
        repo: MockReaderRepository,
        mailer: MockMailer,
        issuer: MockTokenIssuer,
    ) -> VerificationService<MockReaderRepository, MockMailer, MockTokenIssuer> {
        VerificationService::new(
            Arc::new(repo),
            Arc::new(mailer),
            Arc::new(issuer),
            "https://library.example.com/".to_string(),
        )
    }

    #[tokio::test]
    async fn test_send_verification_mails_link() {
        let mut mock_repo = MockReaderRepository::new();
        let mut mock_mailer = MockMailer::new();
        let mut mock_issuer = MockTokenIssuer::new();

        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_reader(id, false))));
        mock_issuer
            .expect_issue()
            .times(1)
            .returning(|_| "tok123".to_string());
        mock_mailer
            .expect_send()
            .withf(|subject, body, recipient| {
                subject == VERIFY_SUBJECT
                    && body.contains("/library/verify-email-confirm/")
                    && body.contains("tok123")
                    && recipient == "reader@example.com"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(mock_repo, mock_mailer, mock_issuer);
        assert!(service.send_verification(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_verification_already_verified() {
        let mut mock_repo = MockReaderRepository::new();
        let mock_mailer = MockMailer::new();
        let mock_issuer = MockTokenIssuer::new();

        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_reader(id, true))));

        let service = service(mock_repo, mock_mailer, mock_issuer);
        let result = service.send_verification(7).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_confirm_success() {
        let mut mock_repo = MockReaderRepository::new();
        let mock_mailer = MockMailer::new();
        let mut mock_issuer = MockTokenIssuer::new();

        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_reader(id, false))));
        mock_issuer
            .expect_validate()
            .withf(|_, token| token == "tok123")
            .returning(|_, _| true);
        mock_repo
            .expect_mark_email_verified()
            .times(1)
            .returning(|id| Ok(test_reader(id, true)));

        let service = service(mock_repo, mock_mailer, mock_issuer);
        let uid = URL_SAFE_NO_PAD.encode("7");
        let reader = service.confirm(&uid, "tok123").await.unwrap();

        assert!(reader.email_is_verified);
    }

    #[tokio::test]
    async fn test_confirm_rejects_stale_token() {
        let mut mock_repo = MockReaderRepository::new();
        let mock_mailer = MockMailer::new();
        let mut mock_issuer = MockTokenIssuer::new();

        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_reader(id, true))));
        mock_issuer.expect_validate().returning(|_, _| false);
        mock_repo.expect_mark_email_verified().times(0);

        let service = service(mock_repo, mock_mailer, mock_issuer);
        let uid = URL_SAFE_NO_PAD.encode("7");
        let result = service.confirm(&uid, "tok123").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_confirm_rejects_garbage_uid() {
        let mock_repo = MockReaderRepository::new();
        let mock_mailer = MockMailer::new();
        let mock_issuer = MockTokenIssuer::new();

        let service = service(mock_repo, mock_mailer, mock_issuer);
        let result = service.confirm("!!not-base64!!", "tok123").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_confirm_unknown_reader_is_invalid_link() {
        let mut mock_repo = MockReaderRepository::new();
        let mock_mailer = MockMailer::new();
        let mock_issuer = MockTokenIssuer::new();

        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = service(mock_repo, mock_mailer, mock_issuer);
        let uid = URL_SAFE_NO_PAD.encode("999");
        let result = service.confirm(&uid, "tok123").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
