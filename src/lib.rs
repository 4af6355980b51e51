//! Async client for the Taskdesk task and leave backend: bearer injection, one-shot token
//! refresh with single-flight rotation, and typed resource calls.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod obs;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::CredentialPair,
		config::GatewayConfig,
		gateway::Gateway,
		http::{ApiResponse, ApiTransport, OutboundRequest, TransportFuture},
		session::LocationTracker,
		store::MemoryStore,
	};

	type Responder = Box<dyn Fn(&OutboundRequest) -> ApiResponse + Send + Sync>;

	/// Base URL used by [`build_scripted_gateway`].
	pub const SCRIPTED_BASE_URL: &str = "http://backend.test/api";

	/// In-process [`ApiTransport`] that answers through a closure and records every request.
	pub struct ScriptedTransport {
		responder: Responder,
		seen: Mutex<Vec<OutboundRequest>>,
	}
	impl ScriptedTransport {
		/// Answers every request with `responder`.
		pub fn new<F>(responder: F) -> Self
		where
			F: 'static + Fn(&OutboundRequest) -> ApiResponse + Send + Sync,
		{
			Self { responder: Box::new(responder), seen: Mutex::new(Vec::new()) }
		}

		/// Requests executed so far, in order.
		pub fn requests(&self) -> Vec<OutboundRequest> {
			self.seen.lock().clone()
		}

		/// Number of executed requests whose URL path equals `path`.
		pub fn calls_to(&self, path: &str) -> usize {
			self.seen.lock().iter().filter(|request| request.url.path() == path).count()
		}
	}
	impl ApiTransport for ScriptedTransport {
		fn execute(&self, request: OutboundRequest) -> TransportFuture<'_> {
			let response = (self.responder)(&request);

			self.seen.lock().push(request);

			Box::pin(async move { Ok(response) })
		}
	}
	impl Debug for ScriptedTransport {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.debug_struct("ScriptedTransport").field("seen", &self.seen.lock().len()).finish()
		}
	}

	/// Constructs a [`Gateway`] over `transport`, an in-memory store seeded with `seed`, and a
	/// location tracker subscribed to its events.
	pub fn build_scripted_gateway(
		transport: ScriptedTransport,
		seed: Option<CredentialPair>,
	) -> (Gateway<ScriptedTransport>, Arc<MemoryStore>, Arc<LocationTracker>) {
		let store = Arc::new(seed.map(MemoryStore::with_pair).unwrap_or_default());
		let config = GatewayConfig::new(SCRIPTED_BASE_URL)
			.expect("Scripted base URL should parse successfully.");
		let gateway = Gateway::with_transport(config, store.clone(), transport);
		let tracker = Arc::new(LocationTracker::new("/dashboard"));

		gateway.subscribe(tracker.clone());

		(gateway, store, tracker)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
