// self
use crate::{_prelude::*, auth::TenantId, obs::CredentialKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRefresh<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRefresh<F> = F;

/// A span builder used by credential accessors.
#[derive(Clone, Debug)]
pub struct RefreshSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RefreshSpan {
	/// Creates a new span tagged with the provided credential kind + stage.
	pub fn new(kind: CredentialKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("jssdk_broker.refresh", credential = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRefresh<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a failed refresh attempt.
pub fn log_attempt_failure(
	kind: CredentialKind,
	tenant: &TenantId,
	attempt: u32,
	max_attempts: u32,
	err: &Error,
) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			credential = kind.as_str(),
			tenant = %tenant,
			attempt,
			max_attempts,
			error = %err,
			"credential refresh attempt failed"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, tenant, attempt, max_attempts, err);
	}
}

/// Logs a failure swallowed by one of the lenient accessors.
pub fn log_degraded_read(kind: CredentialKind, tenant: &TenantId, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(
			credential = kind.as_str(),
			tenant = %tenant,
			error = %err,
			"credential unavailable; returning fallback value"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, tenant, err);
	}
}

/// Logs a freshly accepted credential; the secret itself is never logged.
pub fn log_refreshed(
	kind: CredentialKind,
	tenant: &TenantId,
	expires_at: OffsetDateTime,
	external: bool,
) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			credential = kind.as_str(),
			tenant = %tenant,
			%expires_at,
			external,
			"credential refreshed"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, tenant, expires_at, external);
	}
}
