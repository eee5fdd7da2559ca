//! Email-verification token collaborator port.

use crate::domain::entities::Reader;

/// Issues and validates single-purpose email-verification tokens.
///
/// A token binds the reader's id, email and current verification flag, so a
/// token issued before verification stops validating the moment the flag
/// flips - re-confirming an already-verified reader is rejected without any
/// token bookkeeping in storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::token::HmacTokenIssuer`] - keyed HMAC-SHA256
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produces a verification token for the reader's current state.
    fn issue(&self, reader: &Reader) -> String;

    /// Checks a `(reader, token)` pair for a single confirmation action.
    fn validate(&self, reader: &Reader, token: &str) -> bool;
}
