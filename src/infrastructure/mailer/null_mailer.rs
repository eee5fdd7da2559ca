//! No-op mailer implementation for environments without a mail transport.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::collaborators::Mailer;
use crate::error::AppError;

/// A mailer that delivers nothing.
///
/// Every send succeeds immediately and is logged at debug level. Used in
/// development and tests; production wiring swaps in a real transport behind
/// the same [`Mailer`] port.
pub struct NullMailer;

impl NullMailer {
    /// Creates a new NullMailer instance.
    pub fn new() -> Self {
        debug!("Using NullMailer (mail delivery disabled)");
        Self
    }
}

impl Default for NullMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for NullMailer {
    async fn send(
        &self,
        subject: &str,
        _html_body: &str,
        recipient: &str,
    ) -> Result<(), AppError> {
        debug!(subject, recipient, "mail dropped by NullMailer");
        Ok(())
    }
}
