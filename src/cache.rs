//! Singleflight credential cache.
//!
//! Each [`CredentialCache`] pairs the current value with an async guard. Fresh values are served
//! without touching the guard; an expired or missing value sends the caller through the guard,
//! where the value is re-checked so concurrent callers collapse onto one refresh. Values are
//! replaced wholesale, so a reader never sees a secret from one fetch with an expiry from
//! another.

// self
use crate::{_prelude::*, auth::Credential};

/// Result of [`CredentialCache::get_or_refresh`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheLookup {
	/// The cached value was still fresh.
	Hit(Credential),
	/// The refresh closure ran and its value was stored.
	Refreshed(Credential),
}
impl CacheLookup {
	/// Returns the credential regardless of where it came from.
	pub fn into_credential(self) -> Credential {
		match self {
			Self::Hit(credential) | Self::Refreshed(credential) => credential,
		}
	}

	/// Returns `true` when the cached value was reused.
	pub fn is_hit(&self) -> bool {
		matches!(self, Self::Hit(_))
	}
}

/// Cached credential guarded by a singleflight refresh lock.
#[derive(Debug, Default)]
pub struct CredentialCache {
	value: RwLock<Option<Credential>>,
	refresh_guard: AsyncMutex<()>,
}
impl CredentialCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached credential without blocking on an in-flight refresh.
	pub fn snapshot(&self) -> Option<Credential> {
		self.value.read().clone()
	}

	/// Replaces the cached credential.
	pub fn store(&self, credential: Credential) {
		*self.value.write() = Some(credential);
	}

	/// Drops the cached credential so the next read refreshes.
	pub fn invalidate(&self) -> Option<Credential> {
		self.value.write().take()
	}

	/// Returns the cached credential when it is fresh according to `clock`, otherwise runs
	/// `refresh`.
	///
	/// `clock` is read again after the singleflight guard is taken, so a value that expired
	/// while this caller waited is refreshed rather than reused. On success the refreshed value
	/// replaces the cached one. On failure the previous value (possibly expired) stays in place
	/// and the error is returned unchanged.
	pub async fn get_or_refresh<Clock, F, Fut>(
		&self,
		clock: Clock,
		refresh: F,
	) -> Result<CacheLookup>
	where
		Clock: Fn() -> OffsetDateTime,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<Credential>>,
	{
		if let Some(fresh) = self.fresh_at(clock()) {
			return Ok(CacheLookup::Hit(fresh));
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited on the guard.
		if let Some(fresh) = self.fresh_at(clock()) {
			return Ok(CacheLookup::Hit(fresh));
		}

		let credential = refresh().await?;

		self.store(credential.clone());

		Ok(CacheLookup::Refreshed(credential))
	}

	fn fresh_at(&self, now: OffsetDateTime) -> Option<Credential> {
		self.value.read().as_ref().filter(|credential| !credential.is_expired_at(now)).cloned()
	}
}
