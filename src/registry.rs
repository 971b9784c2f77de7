//! Tenant-scoped routing for "user/contacts" access tokens.
//!
//! Some platforms issue contacts-API tokens from a different secret than the application
//! token. A [`BrokerRegistry`] maps tenant ids to the [`AccessTokenSource`] that should answer
//! [`Broker::user_access_token`](crate::flows::Broker::user_access_token) for that tenant.

// self
use crate::{_prelude::*, auth::TenantId, ext::AccessTokenSource};

/// Shared map of alternate access token sources keyed by tenant.
#[derive(Default)]
pub struct BrokerRegistry {
	sources: RwLock<HashMap<TenantId, Arc<dyn AccessTokenSource>>>,
}
impl BrokerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `source` for `tenant`, returning the source it replaced.
	pub fn register(
		&self,
		tenant: TenantId,
		source: Arc<dyn AccessTokenSource>,
	) -> Option<Arc<dyn AccessTokenSource>> {
		self.sources.write().insert(tenant, source)
	}

	/// Removes the source registered for `tenant`.
	pub fn unregister(&self, tenant: &TenantId) -> Option<Arc<dyn AccessTokenSource>> {
		self.sources.write().remove(tenant)
	}

	/// Looks up the source registered for `tenant`.
	pub fn get(&self, tenant: &TenantId) -> Option<Arc<dyn AccessTokenSource>> {
		self.sources.read().get(tenant).cloned()
	}

	/// Returns `true` when `tenant` has a registered source.
	pub fn contains(&self, tenant: &TenantId) -> bool {
		self.sources.read().contains_key(tenant)
	}

	/// Number of registered tenants.
	pub fn len(&self) -> usize {
		self.sources.read().len()
	}

	/// Returns `true` when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.sources.read().is_empty()
	}
}
impl Debug for BrokerRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let sources = self.sources.read();
		let mut tenants = sources.keys().collect::<Vec<_>>();

		tenants.sort();

		f.debug_struct("BrokerRegistry").field("tenants", &tenants).finish()
	}
}
