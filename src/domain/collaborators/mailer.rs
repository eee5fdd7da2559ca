//! Mail-dispatch collaborator port.

use crate::error::AppError;
use async_trait::async_trait;

/// Outbound mail delivery.
///
/// The core only needs `(subject, html_body, recipient)`; transport, retries
/// and queueing belong to the implementation. No retry policy is defined
/// here - a caller that wants resilience wraps its own backoff around the
/// send.
///
/// # Implementations
///
/// - [`crate::infrastructure::mailer::NullMailer`] - no-op delivery for
///   environments without a mail transport
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers one HTML message to a single recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when delivery fails; the failure is
    /// propagated to the caller uncaught.
    async fn send(&self, subject: &str, html_body: &str, recipient: &str)
        -> Result<(), AppError>;
}
