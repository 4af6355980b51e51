//! Task records.

// self
use crate::{
	_prelude::*,
	api::RecordId,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
};

/// A task as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
	/// Identifier.
	pub id: RecordId,
	/// Title.
	pub title: String,
	/// Free-form description.
	pub description: Option<String>,
	/// Category, from the `category` dropdown.
	pub category: Option<String>,
	/// Service, from the `service` dropdown.
	pub service: Option<String>,
	/// Assignee display value.
	pub assigned_to: Option<String>,
	/// Assigner display value.
	pub assigned_by: Option<String>,
	/// Backend-defined status.
	pub status: Option<String>,
	/// Backend-defined priority.
	pub priority: Option<String>,
	/// Due date as sent by the backend.
	pub due_date: Option<String>,
	/// Creation timestamp as sent by the backend.
	pub created_at: Option<String>,
}

/// Payload for creating or updating a task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
	/// Title.
	pub title: String,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// Service.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub service: Option<String>,
	/// Assignee.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub assigned_to: Option<String>,
	/// Due date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub due_date: Option<String>,
	/// Priority.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub priority: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Every task visible to the caller.
	pub async fn tasks(&self) -> Result<Vec<Task>> {
		self.fetch_json(ApiRequest::get("tasks")).await
	}

	/// One task.
	pub async fn task(&self, id: RecordId) -> Result<Task> {
		self.fetch_json(ApiRequest::get(format!("tasks/{id}"))).await
	}

	/// Creates a task.
	pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
		self.fetch_json(ApiRequest::post("tasks").json(task)?).await
	}

	/// Replaces a task's editable fields.
	pub async fn update_task(&self, id: RecordId, task: &NewTask) -> Result<Task> {
		self.fetch_json(ApiRequest::put(format!("tasks/{id}")).json(task)?).await
	}

	/// Deletes a task.
	pub async fn delete_task(&self, id: RecordId) -> Result<()> {
		self.send_empty(ApiRequest::delete(format!("tasks/{id}"))).await
	}

	/// Tasks assigned to the caller.
	pub async fn my_tasks(&self) -> Result<Vec<Task>> {
		self.fetch_json(ApiRequest::get("tasks/my")).await
	}

	/// Tasks of the caller's team.
	pub async fn team_tasks(&self) -> Result<Vec<Task>> {
		self.fetch_json(ApiRequest::get("tasks/team")).await
	}
}
