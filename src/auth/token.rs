//! Cached credential records and the payloads they are decoded from.

pub mod credential;
pub mod payload;
pub mod secret;
