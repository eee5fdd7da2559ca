//! Mailer implementations.

pub mod null_mailer;

pub use null_mailer::NullMailer;
