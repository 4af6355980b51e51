//! Request/response primitives and the transport seam used by the gateway.
//!
//! [`ApiRequest`] describes a call in replayable form: bodies are held as owned JSON values or
//! owned multipart bytes, so the gateway can resubmit the identical request after a refresh.
//! [`ApiTransport`] is the gateway's only dependency on an HTTP stack; [`ReqwestTransport`] is
//! the default implementation.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Method as ReqwestMethod,
	header::{AUTHORIZATION, CONTENT_TYPE},
	multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, ResponseDecodeError, TransportError},
};

/// HTTP methods used by the backend surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One file field of a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
	/// Form field name.
	pub field: String,
	/// File name reported to the backend.
	pub file_name: String,
	/// MIME type, when known.
	pub content_type: Option<String>,
	/// File contents.
	pub bytes: Vec<u8>,
}
impl Debug for FilePart {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FilePart")
			.field("field", &self.field)
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// Owned multipart body that can be rebuilt for every attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartBody {
	/// Text fields, in insertion order.
	pub text: Vec<(String, String)>,
	/// File fields, in insertion order.
	pub files: Vec<FilePart>,
}
impl MultipartBody {
	/// Appends a text field.
	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.text.push((name.into(), value.into()));

		self
	}

	/// Appends a file field.
	pub fn file(mut self, part: FilePart) -> Self {
		self.files.push(part);

		self
	}
}

/// Request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// JSON document sent with `Content-Type: application/json`.
	Json(serde_json::Value),
	/// `multipart/form-data` body.
	Multipart(MultipartBody),
}

/// A call against the backend, relative to the configured base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the base URL.
	pub path: String,
	/// Query pairs appended to the URL.
	pub query: Vec<(String, String)>,
	/// Payload.
	pub body: RequestBody,
	/// Attach the stored access credential and apply 401 recovery. `false` for login,
	/// register, and refresh.
	pub credentialed: bool,
}
impl ApiRequest {
	/// Creates a credentialed request with no body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: RequestBody::Empty,
			credentialed: true,
		}
	}

	/// `GET path`.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// `POST path`.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// `PUT path`.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// `DELETE path`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let value = serde_json::to_value(body).map_err(ConfigError::EncodeBody)?;

		self.body = RequestBody::Json(value);

		Ok(self)
	}

	/// Uses `body` as a multipart payload.
	pub fn multipart(mut self, body: MultipartBody) -> Self {
		self.body = RequestBody::Multipart(body);

		self
	}

	/// Appends a query pair.
	pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));

		self
	}

	/// Sends the request without credentials and outside the recovery protocol.
	pub fn anonymous(mut self) -> Self {
		self.credentialed = false;

		self
	}
}

/// Fully resolved request handed to an [`ApiTransport`].
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including query.
	pub url: Url,
	/// Bearer credential for the `Authorization` header; `None` sends no header.
	pub bearer: Option<TokenSecret>,
	/// Payload.
	pub body: RequestBody,
}

/// Response returned by an [`ApiTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// `Content-Type` header, when present.
	pub content_type: Option<String>,
	/// Raw body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response with a JSON content type.
	pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, content_type: Some("application/json".into()), body: body.into() }
	}

	/// Returns `true` for 401 Unauthorized.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Returns `true` for 2xx and 3xx, which callers receive as-is.
	pub fn is_pass_through(&self) -> bool {
		(200..400).contains(&self.status)
	}

	/// Decodes the body as JSON, reporting the failing path on mismatch.
	pub fn json_body<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ResponseDecodeError { status: self.status, source }.into())
	}

	/// Converts a 2xx/3xx response into `Ok` and anything else into [`Error::Status`].
	pub fn into_result(self) -> Result<Self> {
		if self.is_pass_through() { Ok(self) } else { Err(self.into_status_error()) }
	}

	/// Builds the pass-through error for a rejected response, extracting the top-level
	/// `message` field when the body is a JSON object carrying one.
	pub fn into_status_error(self) -> Error {
		#[derive(Deserialize)]
		struct ErrorBody {
			message: Option<String>,
		}

		let message = serde_json::from_slice::<ErrorBody>(&self.body)
			.ok()
			.and_then(|body| body.message)
			.filter(|message| !message.is_empty());

		Error::Status {
			status: self.status,
			message,
			body: String::from_utf8_lossy(&self.body).into_owned(),
		}
	}
}

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute [`OutboundRequest`]s.
///
/// Implementations report every HTTP answer, including 4xx/5xx, as `Ok(ApiResponse)`; only
/// failures to obtain a response at all map to `Err`. The gateway owns status interpretation.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` once.
	fn execute(&self, request: OutboundRequest) -> TransportFuture<'_>;
}

/// `User-Agent` sent by [`ReqwestTransport::new`].
#[cfg(feature = "reqwest")]
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a client that identifies itself with [`USER_AGENT`].
	pub fn new() -> Result<Self, ConfigError> {
		ReqwestClient::builder()
			.user_agent(USER_AGENT)
			.build()
			.map(Self)
			.map_err(ConfigError::http_client_build)
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	fn build(&self, request: OutboundRequest) -> Result<reqwest::RequestBuilder> {
		let method = match request.method {
			Method::Get => ReqwestMethod::GET,
			Method::Post => ReqwestMethod::POST,
			Method::Put => ReqwestMethod::PUT,
			Method::Delete => ReqwestMethod::DELETE,
		};
		let mut builder = self.0.request(method, request.url);

		if let Some(token) = &request.bearer {
			builder = builder.header(AUTHORIZATION, token.bearer());
		}

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => builder
				.header(CONTENT_TYPE, "application/json")
				.body(serde_json::to_vec(&value).map_err(ConfigError::EncodeBody)?),
			RequestBody::Multipart(body) => builder.multipart(build_form(body)?),
		};

		Ok(builder)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: OutboundRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let response = self.build(request)?.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let content_type = response
				.headers()
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, content_type, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn build_form(body: MultipartBody) -> Result<Form> {
	let mut form = Form::new();

	for (name, value) in body.text {
		form = form.text(name, value);
	}
	for file in body.files {
		let mut part = Part::bytes(file.bytes).file_name(file.file_name);

		if let Some(mime) = file.content_type {
			part = part.mime_str(&mime).map_err(|e| ConfigError::InvalidRequest {
				reason: format!("invalid content type `{mime}`: {e}"),
			})?;
		}

		form = form.part(file.field, part);
	}

	Ok(form)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_error_extracts_message_field() {
		let err = ApiResponse::json(409, r#"{"message":"Leave overlaps an approved leave"}"#)
			.into_status_error();

		assert_eq!(err.status(), Some(409));
		assert_eq!(
			err.message_or("Failed to create leave request"),
			"Leave overlaps an approved leave"
		);
	}

	#[test]
	fn status_error_tolerates_non_json_bodies() {
		let err = ApiResponse { status: 502, content_type: None, body: b"Bad Gateway".to_vec() }
			.into_status_error();

		match err {
			Error::Status { status, message, body } => {
				assert_eq!(status, 502);
				assert!(message.is_none());
				assert_eq!(body, "Bad Gateway");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn redirects_pass_through() {
		assert!(ApiResponse::json(304, Vec::new()).into_result().is_ok());
		assert!(ApiResponse::json(404, Vec::new()).into_result().is_err());
	}

	#[test]
	fn decode_errors_report_path() {
		#[derive(Debug, Deserialize)]
		struct Grant {
			#[allow(dead_code)]
			token: String,
		}

		let err = ApiResponse::json(200, r#"{"token":7}"#)
			.json_body::<Grant>()
			.expect_err("A numeric token must not decode.");

		match err {
			Error::Decode(decode) => assert_eq!(decode.source.path().to_string(), "token"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn builders_default_to_credentialed() {
		let request = ApiRequest::post("auth/login")
			.json(&serde_json::json!({ "email": "a@b.c" }))
			.expect("JSON body should encode.");

		assert!(request.credentialed);
		assert!(!request.anonymous().credentialed);
	}

	#[test]
	fn file_part_debug_hides_contents() {
		let part = FilePart {
			field: "file".into(),
			file_name: "notes.txt".into(),
			content_type: None,
			bytes: b"secret notes".to_vec(),
		};

		assert!(!format!("{part:?}").contains("secret"));
	}
}
