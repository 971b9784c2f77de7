//! Per-broker refresh counters that work without any metrics backend.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::CredentialKind;

/// Thread-safe counters for one credential kind.
#[derive(Debug, Default)]
pub struct RefreshCounters {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	cache_hits: AtomicU64,
}
impl RefreshCounters {
	/// Fetch attempts, including external handler calls.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Fetches that produced a credential.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Fetch attempts that failed.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Reads served from a fresh cached value.
	pub fn cache_hits(&self) -> u64 {
		self.cache_hits.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}
}

/// Refresh counters for every credential kind a broker manages.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	access_token: RefreshCounters,
	ticket: RefreshCounters,
}
impl RefreshMetrics {
	/// Returns the counters for `kind`.
	pub fn for_kind(&self, kind: CredentialKind) -> &RefreshCounters {
		match kind {
			CredentialKind::AccessToken => &self.access_token,
			CredentialKind::Ticket => &self.ticket,
		}
	}
}
