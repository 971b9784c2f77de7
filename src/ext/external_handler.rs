//! Application-supplied access token handlers.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TenantId},
};

/// Boxed future returned by [`ExternalTokenHandler::fetch_token`].
pub type ExternalTokenFuture<'a> = Pin<Box<dyn Future<Output = Credential> + 'a + Send>>;

/// Capability that hands the broker an access token instead of calling the token endpoint.
///
/// The returned credential is cached as is. It is not validated and the handler is never
/// retried; if it hands back an already expired credential, the next read calls it again.
pub trait ExternalTokenHandler: Send + Sync {
	/// Produces the access token for `tenant`.
	fn fetch_token<'a>(&'a self, tenant: &'a TenantId) -> ExternalTokenFuture<'a>;
}
impl<F, Fut> ExternalTokenHandler for F
where
	F: Send + Sync + Fn(TenantId) -> Fut,
	Fut: 'static + Send + Future<Output = Credential>,
{
	fn fetch_token<'a>(&'a self, tenant: &'a TenantId) -> ExternalTokenFuture<'a> {
		Box::pin(self(tenant.clone()))
	}
}
