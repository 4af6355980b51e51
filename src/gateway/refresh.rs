//! Refresh-credential exchange with a single-flight guard and the session-expiry path.
//!
//! Only one refresh runs at a time per gateway. A caller entering the guard first compares the
//! stored access credential with the one its rejected attempt carried: a mismatch means a
//! concurrent caller already rotated the pair, so the stored pair is reused and no second
//! refresh call is made. Any failure, including a failure to persist the rotated pair, clears
//! the session and publishes [`SessionEvent::Expired`].
//!
//! The guard also remembers the last torn-down session. Callers rejected with that session's
//! access credential share its cause instead of clearing and publishing again.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenGrant, TokenSecret},
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
	obs::{self, CallKind, CallSpan},
	session::SessionEvent,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
	refresh_token: &'a str,
}

/// Last session torn down by the recovery path, kept behind the refresh guard.
#[derive(Debug)]
pub(crate) struct Teardown {
	access_token: TokenSecret,
	cause: Arc<Error>,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Rotates the stored pair through the refresh endpoint without waiting for a 401.
	///
	/// Unlike the recovery path, a failure here leaves the session untouched.
	pub async fn refresh_session(&self) -> Result<CredentialPair> {
		let _singleflight = self.refresh_guard.lock().await;
		let current = self.session.credentials().await?.ok_or(Error::NotAuthenticated)?;
		let fresh = self.exchange_refresh(&current.refresh_token).await?;

		self.session.set(fresh.clone()).await?;
		self.events.publish(SessionEvent::Refreshed);

		Ok(fresh)
	}

	/// Recovers from a 401 on a request that carried `rejected`.
	///
	/// `Ok(())` means fresh credentials are stored and the request may be resubmitted. Any
	/// `Err` is [`Error::SessionExpired`], except a storage failure while reading the session.
	pub(crate) async fn recover(
		&self,
		rejected: Option<&TokenSecret>,
		rejection: Error,
	) -> Result<()> {
		let mut last_teardown = self.refresh_guard.lock().await;

		match self.session.credentials().await? {
			Some(current) if rejected != Some(&current.access_token) => Ok(()),
			Some(current) => {
				let rotated = match self.exchange_refresh(&current.refresh_token).await {
					Ok(fresh) => self.session.set(fresh).await,
					Err(err) => Err(err),
				};

				match rotated {
					Ok(()) => {
						self.events.publish(SessionEvent::Refreshed);

						Ok(())
					},
					Err(err) =>
						Err(self.expire(&mut last_teardown, Some(current.access_token), err).await),
				}
			},
			None => {
				let shared = last_teardown
					.as_ref()
					.filter(|teardown| rejected == Some(&teardown.access_token))
					.map(|teardown| teardown.cause.clone());

				match shared {
					Some(cause) => Err(Error::SessionExpired { source: cause }),
					None => Err(self.expire(&mut last_teardown, rejected.cloned(), rejection).await),
				}
			},
		}
	}

	async fn exchange_refresh(&self, refresh_token: &TokenSecret) -> Result<CredentialPair> {
		self.metrics.record_refresh_attempt();

		let result: Result<CredentialPair> = CallSpan::new(CallKind::Refresh, "exchange_refresh")
			.observe(async {
				let request = ApiRequest::post(self.config.refresh_path.as_str())
					.anonymous()
					.json(&RefreshRequest { refresh_token: refresh_token.expose() })?;
				let grant: TokenGrant =
					self.dispatch(&request, None).await?.into_result()?.json_body()?;

				Ok(CredentialPair::from(grant))
			})
			.await;

		match &result {
			Ok(_) => self.metrics.record_refresh_success(),
			Err(_) => self.metrics.record_refresh_failure(),
		}

		result
	}

	async fn expire(
		&self,
		last_teardown: &mut Option<Teardown>,
		torn_down: Option<TokenSecret>,
		cause: Error,
	) -> Error {
		if let Err(err) = self.session.clear().await {
			obs::trace_clear_failure(&err);
		}

		let cause = Arc::new(cause);

		if let Some(access_token) = torn_down {
			*last_teardown = Some(Teardown { access_token, cause: cause.clone() });
		}

		self.metrics.record_expiration();
		self.events.publish(SessionEvent::Expired { login_path: self.config.login_path.clone() });

		Error::SessionExpired { source: cause }
	}
}
