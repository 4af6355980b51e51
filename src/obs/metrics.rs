// self
use crate::obs::{CallKind, CallOutcome};

/// Bumps `taskdesk_client_call_total{call, outcome}` on the global recorder (when enabled).
pub fn count_call(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"taskdesk_client_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
