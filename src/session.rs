//! Owned session state and the events it publishes to the presentation layer.
//!
//! [`SessionState`] is the only path through which credentials are read or mutated, so every
//! transition (sign-in, refresh rotation, sign-out, expiry) funnels through a handful of
//! auditable methods. [`SessionEvents`] carries those transitions outward; the data layer never
//! navigates on its own.

pub mod events;

pub use events::*;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	store::CredentialStore,
};

/// Session credentials backed by a [`CredentialStore`].
#[derive(Clone)]
pub struct SessionState {
	store: Arc<dyn CredentialStore>,
}
impl SessionState {
	/// Wraps the provided store.
	pub fn new(store: Arc<dyn CredentialStore>) -> Self {
		Self { store }
	}

	/// Returns the stored pair, if any.
	pub async fn credentials(&self) -> Result<Option<CredentialPair>> {
		Ok(self.store.load().await?)
	}

	/// Current access credential, if a session exists.
	pub async fn access_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.credentials().await?.map(|pair| pair.access_token))
	}

	/// Current refresh credential, if a session exists.
	pub async fn refresh_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.credentials().await?.map(|pair| pair.refresh_token))
	}

	/// Returns `true` while a credential pair is stored.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.credentials().await?.is_some())
	}

	/// Replaces the stored pair in a single write.
	pub async fn set(&self, pair: CredentialPair) -> Result<()> {
		Ok(self.store.save(pair).await?)
	}

	/// Removes both credentials.
	pub async fn clear(&self) -> Result<()> {
		Ok(self.store.clear().await?)
	}
}
impl Debug for SessionState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SessionState(..)")
	}
}
