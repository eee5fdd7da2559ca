//! Verification token implementations.

pub mod hmac_token_issuer;

pub use hmac_token_issuer::HmacTokenIssuer;
