//! Access token accessors.
//!
//! A fresh cached token is returned without touching the singleflight guard. Otherwise the
//! first caller through the guard refreshes, either through the configured
//! [`ExternalTokenHandler`](crate::ext::ExternalTokenHandler) (trusted, never retried) or by
//! calling the token endpoint under the broker's [`RetryPolicy`](crate::retry::RetryPolicy).

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenResponse, Credential},
	ext::{AccessTokenFuture, AccessTokenSource},
	flows::Broker,
	http::{self, JsonHttpClient},
	obs::{self, CredentialKind, RefreshOutcome, RefreshSpan},
};

const KIND: CredentialKind = CredentialKind::AccessToken;

impl<C> Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Returns a valid access token, refreshing it first when missing or expired.
	///
	/// A failed refresh leaves the previous (expired) token cached and returns
	/// [`Error::RefreshExhausted`].
	pub async fn access_token(&self) -> Result<String> {
		let span = RefreshSpan::new(KIND, "access_token");

		obs::record_refresh_outcome(KIND, RefreshOutcome::Attempt);

		let lookup = span
			.instrument(
				self.access_token_cache
					.get_or_refresh(OffsetDateTime::now_utc, || self.refresh_access_token()),
			)
			.await;

		self.settle(KIND, lookup)
	}

	/// Best-effort variant of [`Broker::access_token`] that returns an empty string on failure.
	///
	/// The failure is logged; callers that build URLs from the result will fail downstream.
	pub async fn access_token_or_empty(&self) -> String {
		match self.access_token().await {
			Ok(token) => token,
			Err(err) => {
				obs::log_degraded_read(KIND, &self.tenant, &err);

				String::new()
			},
		}
	}

	/// Returns the "user/contacts" access token.
	///
	/// When the attached registry holds a source for this broker's tenant, the request is
	/// delegated to it; otherwise this behaves like [`Broker::access_token`].
	pub async fn user_access_token(&self) -> Result<String> {
		let routed = self.registry.as_ref().and_then(|registry| registry.get(&self.tenant));

		match routed {
			Some(source) => source.access_token().await,
			None => self.access_token().await,
		}
	}

	/// Returns the cached access token without refreshing, even when expired.
	pub fn cached_access_token(&self) -> Option<Credential> {
		self.access_token_cache.snapshot()
	}

	/// Drops the cached access token so the next read refreshes.
	pub fn invalidate_access_token(&self) -> Option<Credential> {
		self.access_token_cache.invalidate()
	}

	async fn refresh_access_token(&self) -> Result<Credential> {
		let counters = self.refresh_metrics.for_kind(KIND);

		if let Some(handler) = &self.external_token_handler {
			counters.record_attempt();

			let credential = handler.fetch_token(&self.tenant).await;

			counters.record_success();
			obs::log_refreshed(KIND, &self.tenant, credential.expires_at, true);

			return Ok(credential);
		}

		let url = self.descriptor.token_url(&self.tenant, &self.secret)?;
		let credential = self
			.retry
			.run(
				KIND,
				|_| self.fetch_access_token(url.clone()),
				|attempt, err| self.on_attempt_failure(KIND, attempt, err),
			)
			.await?;

		counters.record_success();
		obs::log_refreshed(KIND, &self.tenant, credential.expires_at, false);

		Ok(credential)
	}

	async fn fetch_access_token(&self, url: Url) -> Result<Credential> {
		self.refresh_metrics.for_kind(KIND).record_attempt();

		let payload: AccessTokenResponse =
			http::fetch_json(self.http_client.as_ref(), "token", url).await?;

		payload.status.check()?;

		self.issue(payload.access_token, payload.expires_in)
	}
}
impl<C> AccessTokenSource for Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	fn access_token(&self) -> AccessTokenFuture<'_> {
		Box::pin(Broker::access_token(self))
	}
}
