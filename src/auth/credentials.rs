//! The access/refresh credential pair persisted by credential stores.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access and refresh credentials issued together by login or refresh.
///
/// Stores only ever hold a whole pair or nothing, so a session can never be left with one
/// credential and not the other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
	/// Short-lived bearer credential attached to API calls.
	pub access_token: TokenSecret,
	/// Longer-lived secret exchanged for a new pair.
	pub refresh_token: TokenSecret,
	/// Instant the pair was issued locally. Informational only; expiry is discovered by the
	/// backend rejecting a request.
	pub issued_at: OffsetDateTime,
}
impl CredentialPair {
	/// Builds a pair stamped with the current UTC instant.
	pub fn new(access_token: impl Into<TokenSecret>, refresh_token: impl Into<TokenSecret>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: refresh_token.into(),
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Overrides the issued-at instant.
	pub fn with_issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}
}

/// Body returned by the login and refresh endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
	/// New access credential.
	pub token: TokenSecret,
	/// New refresh credential.
	pub refresh_token: TokenSecret,
}
impl From<TokenGrant> for CredentialPair {
	fn from(grant: TokenGrant) -> Self {
		CredentialPair::new(grant.token, grant.refresh_token)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn pair_survives_json_snapshot() {
		let pair = CredentialPair::new("freshTok", "freshRefresh")
			.with_issued_at(macros::datetime!(2026-03-02 09:30 UTC));
		let json = serde_json::to_vec(&pair).expect("Credential pair should serialize.");
		let decoded: CredentialPair =
			serde_json::from_slice(&json).expect("Credential pair should deserialize.");

		assert_eq!(decoded, pair);
		assert_eq!(format!("{pair:?}").matches("<redacted>").count(), 2);
	}

	#[test]
	fn grant_reads_camel_case_fields() {
		let grant: TokenGrant =
			serde_json::from_str(r#"{"token":"freshTok","refreshToken":"freshRefresh"}"#)
				.expect("Grant fixture should deserialize.");
		let pair = CredentialPair::from(grant);

		assert_eq!(pair.access_token.expose(), "freshTok");
		assert_eq!(pair.refresh_token.expose(), "freshRefresh");
	}
}
