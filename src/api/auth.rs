//! Login, registration, and logout.

// self
use crate::{
	_prelude::*,
	api::NewUser,
	auth::{CredentialPair, TokenGrant},
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
	obs::{CallKind, CallSpan},
	session::SessionEvent,
};

#[derive(Serialize)]
struct LoginRequest<'a> {
	email: &'a str,
	password: &'a str,
	role: &'a str,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Signs in and stores the issued credential pair.
	///
	/// The request carries no bearer header and a 401 (bad credentials) is returned as
	/// [`Error::Status`] without touching the current session.
	pub async fn login(&self, email: &str, password: &str, role: &str) -> Result<CredentialPair> {
		CallSpan::new(CallKind::Login, "login")
			.observe(async {
				let request = ApiRequest::post("auth/login")
					.anonymous()
					.json(&LoginRequest { email, password, role })?;
				let grant: TokenGrant = self.fetch_json(request).await?;
				let pair = CredentialPair::from(grant);

				self.session.set(pair.clone()).await?;
				self.events.publish(SessionEvent::SignedIn);

				Ok(pair)
			})
			.await
	}

	/// Registers a new account. No session is created.
	pub async fn register(&self, user: &NewUser) -> Result<()> {
		CallSpan::new(CallKind::Register, "register")
			.observe(async {
				self.send_empty(ApiRequest::post("auth/register").anonymous().json(user)?).await
			})
			.await
	}

	/// Logs out on the backend and clears local credentials.
	///
	/// Local credentials are cleared and [`SessionEvent::SignedOut`] is published whatever the
	/// backend answers; the backend's answer is then returned. A logout whose recovery found
	/// the session already expired counts as success.
	pub async fn logout(&self) -> Result<()> {
		CallSpan::new(CallKind::Logout, "logout")
			.observe(async {
				let remote = match self.send_empty(ApiRequest::post("auth/logout")).await {
					Err(err) if err.is_session_expired() => Ok(()),
					other => other,
				};

				self.session.clear().await?;
				self.events.publish(SessionEvent::SignedOut);

				remote
			})
			.await
	}
}
