//! Small shared helpers.

pub mod password;
