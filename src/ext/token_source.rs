//! Abstract access token sources used for registry routing.

// self
use crate::_prelude::*;

/// Boxed future returned by [`AccessTokenSource::access_token`].
pub type AccessTokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + 'a + Send>>;

/// Anything able to produce a current access token.
///
/// Brokers implement this trait, so a broker can be registered as the alternate source for
/// another broker's tenant.
pub trait AccessTokenSource: Send + Sync {
	/// Returns a valid access token, refreshing it when needed.
	fn access_token(&self) -> AccessTokenFuture<'_>;
}
