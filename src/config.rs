//! Backend addressing: base URL, login entry point, and endpoint joining.

// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "TASKDESK_API_URL";
/// Base URL used when no override is supplied.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// Application route shown after the session expires.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Backend path that exchanges a refresh credential for a new pair.
pub const DEFAULT_REFRESH_PATH: &str = "auth/refresh";

/// Gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	base_url: Url,
	/// Application location the presentation layer navigates to on session expiry.
	pub login_path: String,
	/// Refresh endpoint, relative to the base URL.
	pub refresh_path: String,
}
impl GatewayConfig {
	/// Builds a configuration for `base_url`.
	///
	/// A missing trailing slash is added so relative paths land beneath the base path
	/// (`http://host/api` + `tasks` = `http://host/api/tasks`).
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: normalize_base(base_url)?,
			login_path: DEFAULT_LOGIN_PATH.into(),
			refresh_path: DEFAULT_REFRESH_PATH.into(),
		})
	}

	/// Reads [`API_URL_ENV`] from the process environment, falling back to [`DEFAULT_API_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Resolves the base URL through `lookup`; blank values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: FnOnce(&str) -> Option<String>,
	{
		let base = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty());

		Self::new(base.as_deref().map(str::trim).unwrap_or(DEFAULT_API_URL))
	}

	/// Overrides the login entry point.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Normalized base URL (always ends with `/`).
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Joins a relative endpoint path onto the base URL. Leading slashes are ignored so
	/// `/tasks` and `tasks` resolve identically.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim_start_matches('/');

		self.base_url.join(relative).map_err(|source| ConfigError::InvalidEndpoint {
			path: path.to_owned(),
			source,
		})
	}
}

fn normalize_base(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
		value: raw.to_owned(),
		source: Some(source),
	})?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::InvalidBaseUrl { value: raw.to_owned(), source: None });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_to_local_backend() {
		let config = GatewayConfig::from_lookup(|_| None).expect("Default config should build.");

		assert_eq!(config.base_url().as_str(), "http://localhost:5000/api/");
		assert_eq!(config.login_path, "/login");
	}

	#[test]
	fn environment_override_wins() {
		let config = GatewayConfig::from_lookup(|key| {
			assert_eq!(key, API_URL_ENV);

			Some("https://tasks.example.com/v2/api ".into())
		})
		.expect("Override config should build.");

		assert_eq!(config.base_url().as_str(), "https://tasks.example.com/v2/api/");
	}

	#[test]
	fn blank_override_falls_back() {
		let config =
			GatewayConfig::from_lookup(|_| Some("  ".into())).expect("Blank override is unset.");

		assert_eq!(config.base_url().as_str(), "http://localhost:5000/api/");
	}

	#[test]
	fn endpoint_joins_under_base_path() {
		let config = GatewayConfig::new(DEFAULT_API_URL).expect("Default URL should parse.");

		assert_eq!(
			config.endpoint("/tasks/my").expect("Endpoint should join.").as_str(),
			"http://localhost:5000/api/tasks/my"
		);
		assert_eq!(
			config.endpoint("auth/refresh").expect("Endpoint should join.").as_str(),
			"http://localhost:5000/api/auth/refresh"
		);
	}

	#[test]
	fn rejects_unusable_base_urls() {
		assert!(matches!(
			GatewayConfig::new("not a url"),
			Err(ConfigError::InvalidBaseUrl { source: Some(_), .. })
		));
		assert!(matches!(
			GatewayConfig::new("mailto:ops@example.com"),
			Err(ConfigError::InvalidBaseUrl { source: None, .. })
		));
	}
}
