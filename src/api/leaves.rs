//! Leave requests.

// self
use crate::{
	_prelude::*,
	api::RecordId,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
};

/// A leave request as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
	/// Identifier.
	pub id: RecordId,
	/// Requesting user's display value.
	pub user: Option<String>,
	/// First day of leave.
	pub start_date: String,
	/// Last day of leave.
	pub end_date: String,
	/// Reason given by the requester.
	pub reason: Option<String>,
	/// Backend-defined status (`pending`, `approved`, ...).
	pub status: Option<String>,
	/// Approver display value.
	pub approved_by: Option<String>,
	/// Approval timestamp.
	pub approved_at: Option<String>,
}

/// Payload for creating or updating a leave request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeave {
	/// First day of leave.
	pub start_date: String,
	/// Last day of leave.
	pub end_date: String,
	/// Reason.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Every leave request visible to the caller.
	pub async fn leaves(&self) -> Result<Vec<Leave>> {
		self.fetch_json(ApiRequest::get("leaves")).await
	}

	/// One leave request.
	pub async fn leave(&self, id: RecordId) -> Result<Leave> {
		self.fetch_json(ApiRequest::get(format!("leaves/{id}"))).await
	}

	/// Files a leave request.
	pub async fn create_leave(&self, leave: &NewLeave) -> Result<Leave> {
		self.fetch_json(ApiRequest::post("leaves").json(leave)?).await
	}

	/// Updates a leave request.
	pub async fn update_leave(&self, id: RecordId, leave: &NewLeave) -> Result<Leave> {
		self.fetch_json(ApiRequest::put(format!("leaves/{id}")).json(leave)?).await
	}

	/// Withdraws a leave request.
	pub async fn delete_leave(&self, id: RecordId) -> Result<()> {
		self.send_empty(ApiRequest::delete(format!("leaves/{id}"))).await
	}

	/// The caller's own leave requests.
	pub async fn my_leaves(&self) -> Result<Vec<Leave>> {
		self.fetch_json(ApiRequest::get("leaves/my")).await
	}

	/// Leave requests of the caller's team.
	pub async fn team_leaves(&self) -> Result<Vec<Leave>> {
		self.fetch_json(ApiRequest::get("leaves/team")).await
	}
}
