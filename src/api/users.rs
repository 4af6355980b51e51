//! User administration and the caller's own profile.

// self
use crate::{
	_prelude::*,
	api::RecordId,
	auth::TokenSecret,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
};

/// A user account as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Identifier.
	pub id: RecordId,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Login e-mail.
	pub email: String,
	/// Backend-defined role (`admin`, `manager`, `employee`, ...).
	pub role: String,
	/// Disabled accounts cannot sign in.
	#[serde(default)]
	pub is_active: bool,
	/// Megabytes of uploaded files held by the account.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub used_storage: Option<u64>,
	/// Upload allowance in megabytes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub storage_quota: Option<u64>,
}

/// Payload for registering or creating an account, or for an admin update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Login e-mail.
	pub email: String,
	/// Initial or replacement password; omitted when `None`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<TokenSecret>,
	/// Role.
	pub role: String,
	/// Account state; omitted lets the backend decide.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
}

/// Partial update of the caller's own profile; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Login e-mail.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<TokenSecret>,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Every account.
	pub async fn users(&self) -> Result<Vec<User>> {
		self.fetch_json(ApiRequest::get("users")).await
	}

	/// One account.
	pub async fn user(&self, id: RecordId) -> Result<User> {
		self.fetch_json(ApiRequest::get(format!("users/{id}"))).await
	}

	/// Creates an account on behalf of an administrator.
	pub async fn create_user(&self, user: &NewUser) -> Result<User> {
		self.fetch_json(ApiRequest::post("users").json(user)?).await
	}

	/// Updates an account.
	pub async fn update_user(&self, id: RecordId, user: &NewUser) -> Result<User> {
		self.fetch_json(ApiRequest::put(format!("users/{id}")).json(user)?).await
	}

	/// Deletes an account.
	pub async fn delete_user(&self, id: RecordId) -> Result<()> {
		self.send_empty(ApiRequest::delete(format!("users/{id}"))).await
	}

	/// The caller's own account.
	pub async fn profile(&self) -> Result<User> {
		self.fetch_json(ApiRequest::get("users/profile")).await
	}

	/// Updates the caller's own account.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
		self.fetch_json(ApiRequest::put("users/profile").json(update)?).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, auth::CredentialPair, http::ApiResponse};

	#[tokio::test]
	async fn user_listing_carries_storage_usage() {
		let (gateway, _, _) = build_scripted_gateway(
			ScriptedTransport::new(|_| {
				ApiResponse::json(
					200,
					r#"[
						{"id":1,"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com",
						 "role":"admin","isActive":true,"usedStorage":120,"storageQuota":500},
						{"id":2,"firstName":"Alan","lastName":"Turing","email":"alan@example.com",
						 "role":"employee"}
					]"#,
				)
			}),
			Some(CredentialPair::new("tok", "ref")),
		);
		let users = gateway.users().await.expect("User listing should decode.");

		assert_eq!(users[0].used_storage, Some(120));
		assert_eq!(users[0].storage_quota, Some(500));
		assert_eq!(users[1].used_storage, None);
		assert!(!users[1].is_active);
		assert_eq!(gateway.transport.requests()[0].url.path(), "/api/users");
	}

	#[test]
	fn profile_update_omits_untouched_fields() {
		let update = ProfileUpdate {
			last_name: Some("Okafor".into()),
			password: Some(TokenSecret::new("n3w-pass")),
			..Default::default()
		};
		let json = serde_json::to_value(&update).expect("Profile update should serialize.");

		assert_eq!(json, serde_json::json!({ "lastName": "Okafor", "password": "n3w-pass" }));
		assert!(!format!("{update:?}").contains("n3w-pass"));
	}
}
