//! Session transition signals and the listeners that react to them.

// self
use crate::{_prelude::*, obs};

/// A session transition published by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
	/// Login stored a fresh credential pair.
	SignedIn,
	/// The 401 recovery path rotated the credential pair.
	Refreshed,
	/// The user logged out; credentials were cleared.
	SignedOut,
	/// Recovery failed; credentials were cleared and the user must sign in again.
	Expired {
		/// Application location of the login entry point.
		login_path: String,
	},
}
impl SessionEvent {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			SessionEvent::SignedIn => "signed_in",
			SessionEvent::Refreshed => "refreshed",
			SessionEvent::SignedOut => "signed_out",
			SessionEvent::Expired { .. } => "expired",
		}
	}
}

/// Receives [`SessionEvent`]s. Implementations must not block.
pub trait SessionListener
where
	Self: Send + Sync,
{
	/// Handles one event.
	fn on_event(&self, event: &SessionEvent);
}
impl<F> SessionListener for F
where
	F: Fn(&SessionEvent) + Send + Sync,
{
	fn on_event(&self, event: &SessionEvent) {
		self(event)
	}
}

/// Fan-out hub that delivers every event to each subscribed listener, in subscription order.
#[derive(Clone, Default)]
pub struct SessionEvents {
	listeners: Arc<RwLock<Vec<Arc<dyn SessionListener>>>>,
}
impl SessionEvents {
	/// Registers a listener for all future events.
	pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
		self.listeners.write().push(listener);
	}

	/// Number of subscribed listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.read().len()
	}

	/// Logs `event` and delivers it to every listener.
	pub fn publish(&self, event: SessionEvent) {
		obs::trace_session_event(&event);

		// Snapshot first so a listener may subscribe others without deadlocking.
		let listeners = self.listeners.read().clone();

		for listener in listeners {
			listener.on_event(&event);
		}
	}
}
impl Debug for SessionEvents {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionEvents").field("listeners", &self.listener_count()).finish()
	}
}

/// Models the application's current location and follows session expiry to the login entry
/// point, the way a router would.
#[derive(Debug)]
pub struct LocationTracker {
	current: Mutex<String>,
}
impl LocationTracker {
	/// Starts at `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self { current: Mutex::new(initial.into()) }
	}

	/// Current location.
	pub fn current(&self) -> String {
		self.current.lock().clone()
	}

	/// Moves to `location`, as a user-driven navigation would.
	pub fn navigate(&self, location: impl Into<String>) {
		*self.current.lock() = location.into();
	}
}
impl Default for LocationTracker {
	fn default() -> Self {
		Self::new("/")
	}
}
impl SessionListener for LocationTracker {
	fn on_event(&self, event: &SessionEvent) {
		if let SessionEvent::Expired { login_path } = event {
			self.navigate(login_path.as_str());
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn expiry_moves_tracker_to_login() {
		let events = SessionEvents::default();
		let tracker = Arc::new(LocationTracker::new("/tasks/team"));

		events.subscribe(tracker.clone());
		events.publish(SessionEvent::Refreshed);

		assert_eq!(tracker.current(), "/tasks/team");

		events.publish(SessionEvent::Expired { login_path: "/login".into() });

		assert_eq!(tracker.current(), "/login");
	}

	#[test]
	fn closures_receive_events_in_order() {
		let events = SessionEvents::default();
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();

		events.subscribe(Arc::new(move |event: &SessionEvent| sink.lock().push(event.clone())));
		events.publish(SessionEvent::SignedIn);
		events.publish(SessionEvent::SignedOut);

		assert_eq!(*seen.lock(), vec![SessionEvent::SignedIn, SessionEvent::SignedOut]);
	}
}
