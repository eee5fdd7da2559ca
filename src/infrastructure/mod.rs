//! Infrastructure layer: database, mail and token integrations.

pub mod mailer;
pub mod persistence;
pub mod token;
