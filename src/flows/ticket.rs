//! JS-SDK ticket accessors.
//!
//! Tickets are derived from the access token, so every fetch attempt first obtains a valid
//! token through [`Broker::access_token`]. The ticket cache uses the same singleflight guard as
//! the token cache; the ticket guard is always taken before the token guard.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TicketResponse},
	flows::Broker,
	http::{self, JsonHttpClient},
	obs::{self, CredentialKind, RefreshOutcome, RefreshSpan},
};

const KIND: CredentialKind = CredentialKind::Ticket;

impl<C> Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Returns a valid JS-SDK ticket, refreshing it first when missing or expired.
	pub async fn ticket(&self) -> Result<String> {
		let span = RefreshSpan::new(KIND, "ticket");

		obs::record_refresh_outcome(KIND, RefreshOutcome::Attempt);

		let lookup = span
			.instrument(
				self.ticket_cache.get_or_refresh(OffsetDateTime::now_utc, || self.refresh_ticket()),
			)
			.await;

		self.settle(KIND, lookup)
	}

	/// Best-effort variant of [`Broker::ticket`].
	///
	/// On failure the stale cached ticket is returned when one exists, otherwise an empty
	/// string.
	pub async fn ticket_or_stale(&self) -> String {
		match self.ticket().await {
			Ok(ticket) => ticket,
			Err(err) => {
				obs::log_degraded_read(KIND, &self.tenant, &err);

				self.ticket_cache
					.snapshot()
					.map(|stale| stale.secret.expose().to_owned())
					.unwrap_or_default()
			},
		}
	}

	/// Returns the cached ticket without refreshing, even when expired.
	pub fn cached_ticket(&self) -> Option<Credential> {
		self.ticket_cache.snapshot()
	}

	/// Drops the cached ticket so the next read refreshes.
	pub fn invalidate_ticket(&self) -> Option<Credential> {
		self.ticket_cache.invalidate()
	}

	async fn refresh_ticket(&self) -> Result<Credential> {
		let credential = self
			.retry
			.run(
				KIND,
				|_| self.fetch_ticket(),
				|attempt, err| self.on_attempt_failure(KIND, attempt, err),
			)
			.await?;

		self.refresh_metrics.for_kind(KIND).record_success();
		obs::log_refreshed(KIND, &self.tenant, credential.expires_at, false);

		Ok(credential)
	}

	async fn fetch_ticket(&self) -> Result<Credential> {
		self.refresh_metrics.for_kind(KIND).record_attempt();

		let access_token = self.access_token().await?;
		let url = self.descriptor.ticket_url(&access_token);
		let payload: TicketResponse =
			http::fetch_json(self.http_client.as_ref(), "ticket", url).await?;

		payload.status.check()?;

		self.issue(payload.ticket, payload.expires_in)
	}
}
