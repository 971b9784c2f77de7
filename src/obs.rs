//! Optional observability helpers for credential refreshes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `jssdk_broker.refresh` with the `credential`
//!   and `stage` fields, a `warn` event for every failed refresh attempt, and `debug` events for
//!   refreshed credentials.
//! - Enable `metrics` to increment the `jssdk_broker_refresh_total` counter for every
//!   attempt/cache hit/success/failure, labeled by `credential` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Credential kinds managed by the broker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
	/// Platform access token.
	AccessToken,
	/// JS-SDK ticket derived from the access token.
	Ticket,
}
impl CredentialKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKind::AccessToken => "access_token",
			CredentialKind::Ticket => "ticket",
		}
	}
}
impl Display for CredentialKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
	/// Entry to a broker accessor.
	Attempt,
	/// Cached value was still fresh.
	CacheHit,
	/// A new credential was fetched.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RefreshOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RefreshOutcome::Attempt => "attempt",
			RefreshOutcome::CacheHit => "cache_hit",
			RefreshOutcome::Success => "success",
			RefreshOutcome::Failure => "failure",
		}
	}
}
impl Display for RefreshOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
