//! Extension points supplied by the embedding application.
//!
//! [`ExternalTokenHandler`] replaces the broker's network fetch for access tokens, while
//! [`AccessTokenSource`] lets a [`BrokerRegistry`](crate::registry::BrokerRegistry) route
//! "user/contacts" token requests to another broker or an application-owned cache.

pub mod external_handler;
pub mod token_source;

pub use external_handler::*;
pub use token_source::*;
