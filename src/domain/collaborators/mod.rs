//! Ports for external collaborators the core calls into.
//!
//! The core treats mail delivery and verification-token handling as
//! in-process function contracts; concrete implementations live in
//! `crate::infrastructure`.

pub mod mailer;
pub mod token_issuer;

pub use mailer::Mailer;
pub use token_issuer::TokenIssuer;

#[cfg(test)]
pub use mailer::MockMailer;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
