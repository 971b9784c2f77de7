//! Bounded retry loop used by credential refreshes.

// self
use crate::{_prelude::*, obs::CredentialKind};

/// Fixed-interval retry policy applied to every remote refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
	/// Total number of attempts, including the first one. Values below one are treated as one.
	pub max_attempts: u32,
	/// Pause inserted after a failed attempt before the next one starts.
	pub delay: Duration,
}
impl RetryPolicy {
	const DEFAULT_ATTEMPTS: u32 = 3;
	const DEFAULT_DELAY: Duration = Duration::SECOND;

	/// Creates a policy with the provided attempt budget and pause.
	pub fn new(max_attempts: u32, delay: Duration) -> Self {
		Self { max_attempts, delay }
	}

	/// Policy that performs a single attempt.
	pub fn no_retry() -> Self {
		Self::new(1, Duration::ZERO)
	}

	/// Overrides the attempt budget.
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts;

		self
	}

	/// Overrides the pause between attempts; negative values are clamped to zero.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = if delay.is_negative() { Duration::ZERO } else { delay };

		self
	}

	/// Effective attempt budget; never below one.
	pub fn attempts(&self) -> u32 {
		self.max_attempts.max(1)
	}

	/// Runs `op` until it succeeds or the attempt budget is spent.
	///
	/// `on_failure` observes every failed attempt (1-based) before the pause. The final error
	/// is wrapped in [`Error::RefreshExhausted`].
	pub async fn run<T, F, Fut, OnFailure>(
		&self,
		credential: CredentialKind,
		mut op: F,
		mut on_failure: OnFailure,
	) -> Result<T>
	where
		F: FnMut(u32) -> Fut,
		Fut: Future<Output = Result<T>>,
		OnFailure: FnMut(u32, &Error),
	{
		let attempts = self.attempts();
		let mut attempt = 1;

		loop {
			let err = match op(attempt).await {
				Ok(value) => return Ok(value),
				Err(err) => err,
			};

			on_failure(attempt, &err);

			if attempt >= attempts {
				return Err(Error::RefreshExhausted { credential, attempts, last: Box::new(err) });
			}

			sleep(self.delay).await;

			attempt += 1;
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
	}
}

async fn sleep(delay: Duration) {
	match std::time::Duration::try_from(delay) {
		Ok(delay) if !delay.is_zero() => tokio::time::sleep(delay).await,
		_ => (),
	}
}
