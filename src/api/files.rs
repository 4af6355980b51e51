//! Attachment upload and removal.

// self
use crate::{
	_prelude::*,
	api::RecordId,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport, FilePart, MultipartBody},
};

/// A file to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
	/// Name reported to the backend.
	pub file_name: String,
	/// MIME type, when known.
	pub content_type: Option<String>,
	/// Contents.
	pub bytes: Vec<u8>,
}
impl FileUpload {
	/// Creates an upload with no explicit MIME type.
	pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		Self { file_name: file_name.into(), content_type: None, bytes: bytes.into() }
	}

	/// Sets the MIME type.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());

		self
	}
}

/// A stored attachment as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
	/// Identifier.
	pub id: RecordId,
	/// Original file name.
	pub file_name: Option<String>,
	/// Download location.
	pub url: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Uploads `file`, optionally attaching it to a task.
	///
	/// Sent as `multipart/form-data` with a `file` field and, when `task_id` is set, a
	/// `taskId` text field.
	pub async fn upload_file(
		&self,
		file: FileUpload,
		task_id: Option<RecordId>,
	) -> Result<StoredFile> {
		self.fetch_json(ApiRequest::post("files/upload").multipart(upload_body(file, task_id)))
			.await
	}

	/// Deletes an attachment.
	pub async fn delete_file(&self, id: RecordId) -> Result<()> {
		self.send_empty(ApiRequest::delete(format!("files/{id}"))).await
	}
}

fn upload_body(file: FileUpload, task_id: Option<RecordId>) -> MultipartBody {
	let body = MultipartBody::default().file(FilePart {
		field: "file".into(),
		file_name: file.file_name,
		content_type: file.content_type,
		bytes: file.bytes,
	});

	match task_id {
		Some(id) => body.text("taskId", id.to_string()),
		None => body,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::{CredentialPair, TokenSecret},
		http::{ApiResponse, RequestBody},
	};

	#[tokio::test]
	async fn resubmitted_upload_replays_the_same_form() {
		let (gateway, _, _) = build_scripted_gateway(
			ScriptedTransport::new(|request| {
				match (request.url.path(), request.bearer.as_ref().map(TokenSecret::expose)) {
					("/api/auth/refresh", _) => ApiResponse::json(
						200,
						r#"{"token":"freshTok","refreshToken":"freshRefresh"}"#,
					),
					(_, Some("freshTok")) =>
						ApiResponse::json(201, r#"{"id":12,"fileName":"notes.txt"}"#),
					_ => ApiResponse::json(401, r#"{"message":"Token expired"}"#),
				}
			}),
			Some(CredentialPair::new("expiredTok", "goodRefresh")),
		);
		let stored = gateway
			.upload_file(FileUpload::new("notes.txt", b"standup notes".to_vec()), Some(41))
			.await
			.expect("The resubmitted upload should succeed.");
		let requests = gateway.transport.requests();

		assert_eq!(stored.id, 12);
		assert_eq!(requests.len(), 3);
		assert_eq!(requests[1].url.path(), "/api/auth/refresh");
		assert_eq!(requests[0].body, requests[2].body);
		assert_eq!(requests[2].bearer, Some(TokenSecret::from("freshTok")));
		assert!(matches!(
			&requests[2].body,
			RequestBody::Multipart(form) if form.files[0].bytes == b"standup notes"
		));
	}

	#[test]
	fn task_id_field_only_when_present() {
		let upload = FileUpload::new("report.pdf", b"%PDF".to_vec()).with_content_type("application/pdf");
		let with_task = upload_body(upload.clone(), Some(42));
		let without_task = upload_body(upload, None);

		assert_eq!(with_task.text, vec![("taskId".to_string(), "42".to_string())]);
		assert!(without_task.text.is_empty());
		assert_eq!(with_task.files[0].field, "file");
		assert_eq!(with_task.files[0].content_type.as_deref(), Some("application/pdf"));
	}
}
