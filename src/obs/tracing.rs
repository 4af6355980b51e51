// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome, count_call},
	session::SessionEvent,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span and counters wrapped around one gateway call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	kind: CallKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("taskdesk_client.call", call = kind.as_str(), stage);

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Runs `call` inside the span, counting the attempt and its outcome.
	///
	/// Failures are logged at debug level; the caller decides how loudly to report them.
	pub async fn observe<Fut, V>(self, call: Fut) -> Result<V>
	where
		Fut: Future<Output = Result<V>>,
	{
		count_call(self.kind, CallOutcome::Attempt);

		let result = self.instrument(call).await;

		match &result {
			Ok(_) => count_call(self.kind, CallOutcome::Success),
			Err(err) => {
				count_call(self.kind, CallOutcome::Failure);

				#[cfg(feature = "tracing")]
				tracing::debug!(parent: &self.span, error = %err, "call failed");
				#[cfg(not(feature = "tracing"))]
				let _ = err;
			},
		}

		result
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
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

/// Emits a log event for a session transition. Credentials never reach the log.
pub fn trace_session_event(event: &SessionEvent) {
	#[cfg(feature = "tracing")]
	{
		match event {
			SessionEvent::Expired { login_path } =>
				tracing::warn!(login_path = %login_path, "session expired; credentials cleared"),
			other => tracing::info!(event = other.as_str(), "session updated"),
		}
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = event;
	}
}

/// Emits an error event when the stored session could not be wiped during expiry.
pub fn trace_clear_failure(err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(error = %err, "failed to clear credentials while expiring the session");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Request, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[tokio::test]
	async fn observe_returns_the_call_result() {
		let ok = CallSpan::new(CallKind::Login, "observe_ok").observe(async { Ok(7) }).await;
		let err = CallSpan::new(CallKind::Login, "observe_err")
			.observe(async { Err::<(), _>(Error::NotAuthenticated) })
			.await;

		assert_eq!(ok.expect("The successful call should pass through."), 7);
		assert!(matches!(err, Err(Error::NotAuthenticated)));
	}

	#[test]
	fn session_events_trace_without_subscriber() {
		trace_session_event(&SessionEvent::Expired { login_path: "/login".into() });
		trace_session_event(&SessionEvent::Refreshed);
	}
}
