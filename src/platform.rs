//! Platform descriptors: validated endpoint configuration for token and ticket refreshes.
//!
//! A [`PlatformDescriptor`] names the token URL template (rendered with the tenant id and app
//! secret), the ticket endpoint the access token is appended to, and the local lifetime the
//! broker assigns to every fetched credential. Presets cover WeCom and Official Accounts.

pub mod descriptor;

pub use descriptor::*;
