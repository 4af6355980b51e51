//! Client-level error types shared across the gateway, session, stores, and resource calls.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request-encoding problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Successful response whose body could not be decoded.
	#[error(transparent)]
	Decode(#[from] ResponseDecodeError),

	/// Backend answered with a status the gateway passes through untouched.
	#[error("Backend responded with HTTP {status}{}.", suffix(.message))]
	Status {
		/// HTTP status code.
		status: u16,
		/// Top-level `message` field of the error body, when present.
		message: Option<String>,
		/// Raw error body, lossily decoded as UTF-8.
		body: String,
	},
	/// The operation needs a stored session but none exists.
	#[error("No session credentials are stored.")]
	NotAuthenticated,
	/// The 401 recovery path failed; local credentials were cleared.
	#[error("Session expired; sign in again.")]
	SessionExpired {
		/// Refresh failure, or the original rejection when no refresh credential existed.
		/// Requests torn down by the same expiry share one cause.
		#[source]
		source: Arc<Error>,
	},
}
impl Error {
	/// Returns the backend-supplied message when one exists, otherwise `fallback`.
	///
	/// Session expiry reports the message of the error that caused it.
	pub fn message_or(&self, fallback: &str) -> String {
		match self {
			Self::Status { message: Some(message), .. } => message.clone(),
			Self::SessionExpired { source } => source.message_or(fallback),
			_ => fallback.to_owned(),
		}
	}

	/// HTTP status carried by the error, if the backend produced one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns `true` when the session was torn down by the recovery path.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Self::SessionExpired { .. })
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed or cannot carry relative paths.
	#[error("Base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Offending value.
		value: String,
		/// Underlying parsing failure, when the value did not parse at all.
		#[source]
		source: Option<url::ParseError>,
	},
	/// A relative endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	EncodeBody(#[source] serde_json::Error),
	/// Outbound request could not be assembled by the transport.
	#[error("Request could not be assembled: {reason}.")]
	InvalidRequest {
		/// Transport-supplied reason.
		reason: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn suffix(message: &Option<String>) -> String {
	message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// A 2xx body did not match the expected shape.
#[derive(Debug, ThisError)]
#[error("Response body from HTTP {status} could not be decoded.")]
pub struct ResponseDecodeError {
	/// HTTP status of the decoded response.
	pub status: u16,
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
