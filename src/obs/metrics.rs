// self
use crate::obs::{CredentialKind, RefreshOutcome};

/// Records a refresh outcome via the global metrics recorder (when enabled).
pub fn record_refresh_outcome(kind: CredentialKind, outcome: RefreshOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"jssdk_broker_refresh_total",
			"credential" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_refresh_outcome_noop_without_metrics() {
		record_refresh_outcome(CredentialKind::Ticket, RefreshOutcome::CacheHit);
	}
}
