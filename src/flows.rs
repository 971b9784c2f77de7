//! Credential accessors powered by the broker facade.

pub mod js_config;
pub mod metrics;

mod access_token;
mod ticket;

pub use self::{js_config::*, metrics::*};

// self
use crate::{
	_prelude::*,
	auth::{Credential, TenantId, TokenSecret},
	cache::{CacheLookup, CredentialCache},
	ext::ExternalTokenHandler,
	http::JsonHttpClient,
	obs::{self, CredentialKind, RefreshOutcome},
	platform::PlatformDescriptor,
	registry::BrokerRegistry,
	retry::RetryPolicy,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Owns the access token and JS-SDK ticket caches for one tenant.
///
/// The broker holds the HTTP client, platform descriptor, and tenant credentials so each
/// accessor only has to describe how its credential is fetched. Clones share both caches and
/// the refresh counters.
pub struct Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// HTTP client used for every outbound platform request.
	pub http_client: Arc<C>,
	/// Platform descriptor that defines endpoints and the local credential TTL.
	pub descriptor: PlatformDescriptor,
	/// Tenant (corp id / app id) the credentials belong to.
	pub tenant: TenantId,
	/// Numeric sub-application id echoed as `jsapp` in [`JsConfig`].
	pub agent_id: i64,
	/// Replaces the token endpoint when present.
	pub external_token_handler: Option<Arc<dyn ExternalTokenHandler>>,
	/// Alternate token sources consulted by [`Broker::user_access_token`].
	pub registry: Option<Arc<BrokerRegistry>>,
	/// Retry policy applied to every remote refresh.
	pub retry: RetryPolicy,
	/// Defaults used when building [`JsConfig`] values.
	pub js_config_options: JsConfigOptions,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	secret: TokenSecret,
	access_token_cache: Arc<CredentialCache>,
	ticket_cache: Arc<CredentialCache>,
}
impl<C> Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: PlatformDescriptor,
		tenant: TenantId,
		secret: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			tenant,
			agent_id: 0,
			external_token_handler: None,
			registry: None,
			retry: RetryPolicy::default(),
			js_config_options: JsConfigOptions::default(),
			refresh_metrics: Default::default(),
			secret: TokenSecret::new(secret),
			access_token_cache: Default::default(),
			ticket_cache: Default::default(),
		}
	}

	/// Sets the sub-application id reported in [`JsConfig::agent_id`].
	pub fn with_agent_id(mut self, agent_id: i64) -> Self {
		self.agent_id = agent_id;

		self
	}

	/// Routes access token refreshes through `handler` instead of the token endpoint.
	pub fn with_external_token_handler(mut self, handler: Arc<dyn ExternalTokenHandler>) -> Self {
		self.external_token_handler = Some(handler);

		self
	}

	/// Attaches the registry consulted by [`Broker::user_access_token`].
	pub fn with_registry(mut self, registry: Arc<BrokerRegistry>) -> Self {
		self.registry = Some(registry);

		self
	}

	/// Overrides the retry policy (3 attempts, 1 second apart by default).
	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Overrides the [`JsConfig`] defaults.
	pub fn with_js_config_options(mut self, options: JsConfigOptions) -> Self {
		self.js_config_options = options;

		self
	}

	/// Resolves a cache lookup into the credential value and records its outcome.
	fn settle(&self, kind: CredentialKind, lookup: Result<CacheLookup>) -> Result<String> {
		match lookup {
			Ok(lookup) => {
				if lookup.is_hit() {
					self.refresh_metrics.for_kind(kind).record_cache_hit();
					obs::record_refresh_outcome(kind, RefreshOutcome::CacheHit);
				} else {
					obs::record_refresh_outcome(kind, RefreshOutcome::Success);
				}

				Ok(lookup.into_credential().secret.expose().to_owned())
			},
			Err(err) => {
				obs::record_refresh_outcome(kind, RefreshOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Wraps a freshly fetched value with the descriptor's local lifetime.
	///
	/// The platform-declared lifetime is kept for diagnostics but never drives expiry.
	fn issue(&self, secret: String, declared_ttl_secs: i64) -> Result<Credential> {
		let mut builder = Credential::builder()
			.secret(secret)
			.issued_at(OffsetDateTime::now_utc())
			.expires_in(self.descriptor.credential_ttl);

		if declared_ttl_secs > 0 {
			builder = builder.declared_ttl(Duration::seconds(declared_ttl_secs));
		}

		Ok(builder.build()?)
	}

	fn on_attempt_failure(&self, kind: CredentialKind, attempt: u32, err: &Error) {
		self.refresh_metrics.for_kind(kind).record_failure();

		obs::log_attempt_failure(kind, &self.tenant, attempt, self.retry.attempts(), err);
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a new broker for the provided descriptor and tenant credentials.
	///
	/// The broker provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(
		descriptor: PlatformDescriptor,
		tenant: TenantId,
		secret: impl Into<String>,
	) -> Self {
		Self::with_http_client(descriptor, tenant, secret, ReqwestHttpClient::default())
	}
}
impl<C> Clone for Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			descriptor: self.descriptor.clone(),
			tenant: self.tenant.clone(),
			agent_id: self.agent_id,
			external_token_handler: self.external_token_handler.clone(),
			registry: self.registry.clone(),
			retry: self.retry,
			js_config_options: self.js_config_options.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			secret: self.secret.clone(),
			access_token_cache: self.access_token_cache.clone(),
			ticket_cache: self.ticket_cache.clone(),
		}
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor.id)
			.field("tenant", &self.tenant)
			.field("agent_id", &self.agent_id)
			.field("secret", &self.secret)
			.field("external_token_handler", &self.external_token_handler.is_some())
			.field("registry", &self.registry)
			.field("retry", &self.retry)
			.finish()
	}
}
