//! Dropdown metadata (categories, services, priorities, ...), grouped by `name`.

// self
use crate::{
	_prelude::*,
	api::RecordId,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
};

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dropdown {
	/// Identifier.
	pub id: RecordId,
	/// Group the option belongs to.
	pub name: String,
	/// Stored value.
	pub value: String,
	/// Display label.
	pub label: String,
	/// Inactive options are hidden from forms.
	#[serde(default = "active")]
	pub is_active: bool,
}

/// Payload for creating or updating an option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDropdown {
	/// Group the option belongs to.
	pub name: String,
	/// Stored value.
	pub value: String,
	/// Display label.
	pub label: String,
	/// Whether the option is offered.
	pub is_active: bool,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Every option of every group.
	pub async fn dropdowns(&self) -> Result<Vec<Dropdown>> {
		self.fetch_json(ApiRequest::get("dropdowns")).await
	}

	/// One option.
	pub async fn dropdown(&self, id: RecordId) -> Result<Dropdown> {
		self.fetch_json(ApiRequest::get(format!("dropdowns/{id}"))).await
	}

	/// Options of the group called `name`.
	pub async fn dropdowns_by_name(&self, name: &str) -> Result<Vec<Dropdown>> {
		self.fetch_json(ApiRequest::get(format!("dropdowns/name/{}", escape_segment(name)))).await
	}

	/// Creates an option.
	pub async fn create_dropdown(&self, dropdown: &NewDropdown) -> Result<Dropdown> {
		self.fetch_json(ApiRequest::post("dropdowns").json(dropdown)?).await
	}

	/// Updates an option.
	pub async fn update_dropdown(&self, id: RecordId, dropdown: &NewDropdown) -> Result<Dropdown> {
		self.fetch_json(ApiRequest::put(format!("dropdowns/{id}")).json(dropdown)?).await
	}

	/// Deletes an option.
	pub async fn delete_dropdown(&self, id: RecordId) -> Result<()> {
		self.send_empty(ApiRequest::delete(format!("dropdowns/{id}"))).await
	}
}

fn active() -> bool {
	true
}

/// Escapes the characters URL joining would treat as structure. Everything else is
/// percent-encoded by the URL parser itself.
fn escape_segment(value: &str) -> String {
	match value {
		"." => return "%2E".into(),
		".." => return "%2E%2E".into(),
		_ => {},
	}

	let mut escaped = String::with_capacity(value.len());

	for c in value.chars() {
		match c {
			'%' => escaped.push_str("%25"),
			'/' => escaped.push_str("%2F"),
			'\\' => escaped.push_str("%5C"),
			'?' => escaped.push_str("%3F"),
			'#' => escaped.push_str("%23"),
			c => escaped.push(c),
		}
	}

	escaped
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::GatewayConfig;

	#[test]
	fn escaped_names_stay_in_one_segment() {
		let config =
			GatewayConfig::new("http://localhost:5000/api").expect("Config fixture should build.");
		let url = config
			.endpoint(&format!("dropdowns/name/{}", escape_segment("ops/dev team?#1")))
			.expect("Escaped path should join.");

		assert_eq!(url.path(), "/api/dropdowns/name/ops%2Fdev%20team%3F%231");
		assert!(url.query().is_none());
		assert_eq!(escape_segment(".."), "%2E%2E");
	}

	#[test]
	fn missing_active_flag_defaults_to_true() {
		let dropdown: Dropdown =
			serde_json::from_str(r#"{"id":3,"name":"priority","value":"high","label":"High"}"#)
				.expect("Dropdown fixture should deserialize.");

		assert!(dropdown.is_active);
	}
}
