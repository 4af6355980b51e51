//! Authenticated request gateway.
//!
//! [`Gateway::send`] attaches the stored access credential to every credentialed request. When
//! the backend answers 401, the request's [`RequestState`] decides whether recovery may run:
//! from [`RequestState::Initial`] the gateway exchanges the refresh credential once (behind a
//! single-flight guard, see [`refresh`]) and resubmits; from [`RequestState::RetriedOnce`] the
//! 401 is returned to the caller. When recovery fails the session is cleared and
//! [`SessionEvent::Expired`](crate::session::SessionEvent::Expired) is published.

pub mod refresh;

mod metrics;

pub use metrics::GatewayMetrics;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::GatewayConfig,
	http::{ApiRequest, ApiResponse, ApiTransport, OutboundRequest},
	obs::{CallKind, CallSpan},
	session::{SessionEvents, SessionListener, SessionState},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestTransport>;

/// Lifecycle of one logical request with respect to 401 recovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
	/// Not yet resubmitted; a 401 may trigger recovery.
	#[default]
	Initial,
	/// Already resubmitted after a refresh; a 401 is final.
	RetriedOnce,
}
impl RequestState {
	/// Returns `true` while a 401 may still trigger recovery.
	pub const fn can_recover(self) -> bool {
		matches!(self, Self::Initial)
	}

	/// State after a successful recovery.
	pub const fn advance(self) -> Self {
		Self::RetriedOnce
	}
}

/// Wraps every backend call with credential attachment and 401 recovery.
///
/// The gateway owns the transport, the session, and the event hub, so callers only describe
/// what to call. Clones share all state, including the refresh single-flight guard.
pub struct Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Backend addressing.
	pub config: GatewayConfig,
	/// Credential access.
	pub session: SessionState,
	/// Session transition hub.
	pub events: SessionEvents,
	/// Shared counters.
	pub metrics: Arc<GatewayMetrics>,
	refresh_guard: Arc<AsyncMutex<Option<refresh::Teardown>>>,
}
impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a gateway over the caller-provided transport.
	pub fn with_transport(
		config: GatewayConfig,
		store: Arc<dyn CredentialStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			config,
			session: SessionState::new(store),
			events: SessionEvents::default(),
			metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Subscribes `listener` to session events.
	pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
		self.events.subscribe(listener);
	}

	/// Sends `request`, applying bearer injection and 401 recovery.
	///
	/// 2xx/3xx responses are returned as-is; other statuses surface as
	/// [`Error::Status`]. A failed recovery surfaces as [`Error::SessionExpired`].
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		self.metrics.record_request();

		CallSpan::new(CallKind::Request, "send").observe(self.send_with_recovery(&request)).await
	}

	/// Sends `request` and decodes the JSON body.
	pub async fn fetch_json<R>(&self, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(request).await?.json_body()
	}

	/// Sends `request` and discards the body.
	pub async fn send_empty(&self, request: ApiRequest) -> Result<()> {
		self.send(request).await.map(drop)
	}

	async fn send_with_recovery(&self, request: &ApiRequest) -> Result<ApiResponse> {
		let mut state = RequestState::Initial;

		loop {
			let bearer =
				if request.credentialed { self.session.access_token().await? } else { None };
			let response = self.dispatch(request, bearer.clone()).await?;

			if !(request.credentialed && response.is_unauthorized()) {
				return response.into_result();
			}
			if !state.can_recover() {
				return Err(response.into_status_error());
			}

			self.recover(bearer.as_ref(), response.into_status_error()).await?;

			state = state.advance();

			self.metrics.record_resubmit();
		}
	}

	/// Resolves `request` against the base URL and executes it once.
	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		bearer: Option<TokenSecret>,
	) -> Result<ApiResponse> {
		let mut url = self.config.endpoint(&request.path)?;

		if !request.query.is_empty() {
			url.query_pairs_mut().extend_pairs(request.query.iter());
		}

		self.transport
			.execute(OutboundRequest {
				method: request.method,
				url,
				bearer,
				body: request.body.clone(),
			})
			.await
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestTransport> {
	/// Creates a gateway with its own reqwest transport.
	pub fn new(config: GatewayConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
		Ok(Self::with_transport(config, store, ReqwestTransport::new()?))
	}

	/// Creates a gateway whose base URL comes from the environment.
	pub fn from_env(store: Arc<dyn CredentialStore>) -> Result<Self> {
		Self::new(GatewayConfig::from_env()?, store)
	}
}
impl<T> Clone for Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			session: self.session.clone(),
			events: self.events.clone(),
			metrics: self.metrics.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<T> Debug for Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.config.base_url().as_str())
			.field("events", &self.events)
			.finish()
	}
}
