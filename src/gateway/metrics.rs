// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gateway traffic and recovery.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
	requests: AtomicU64,
	resubmits: AtomicU64,
	refresh_attempts: AtomicU64,
	refresh_successes: AtomicU64,
	refresh_failures: AtomicU64,
	expirations: AtomicU64,
}
impl GatewayMetrics {
	/// Requests handed to [`Gateway::send`](crate::gateway::Gateway::send).
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// Original requests resubmitted after a 401.
	pub fn resubmits(&self) -> u64 {
		self.resubmits.load(Ordering::Relaxed)
	}

	/// Calls made to the refresh endpoint.
	pub fn refresh_attempts(&self) -> u64 {
		self.refresh_attempts.load(Ordering::Relaxed)
	}

	/// Refresh calls that produced a new pair.
	pub fn refresh_successes(&self) -> u64 {
		self.refresh_successes.load(Ordering::Relaxed)
	}

	/// Refresh calls that failed.
	pub fn refresh_failures(&self) -> u64 {
		self.refresh_failures.load(Ordering::Relaxed)
	}

	/// Sessions torn down by the recovery path.
	pub fn expirations(&self) -> u64 {
		self.expirations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_resubmit(&self) {
		self.resubmits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_attempt(&self) {
		self.refresh_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_success(&self) {
		self.refresh_successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_failure(&self) {
		self.refresh_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_expiration(&self) {
		self.expirations.fetch_add(1, Ordering::Relaxed);
	}
}
