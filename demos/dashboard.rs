//! Demonstrates a dashboard session against a mock backend: sign in, watch the access credential
//! expire, and let the gateway rotate it and replay the task listing transparently.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use taskdesk_client::{
	config::GatewayConfig,
	gateway::ReqwestGateway,
	session::{LocationTracker, SessionEvent},
	store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).json_body(json!({ "token": "expiredTok", "refreshToken": "goodRefresh" }));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks/my").header("authorization", "Bearer expiredTok");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "freshTok", "refreshToken": "freshRefresh" }));
		})
		.await;
	let tasks_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks/my").header("authorization", "Bearer freshTok");
			then.status(200).json_body(json!([
				{ "id": 1, "title": "Review leave calendar", "status": "in-progress" },
				{ "id": 2, "title": "Close sprint tickets", "status": "pending" }
			]));
		})
		.await;
	let gateway = ReqwestGateway::new(
		GatewayConfig::new(&server.url("/api"))?,
		Arc::new(MemoryStore::default()),
	)?;
	let location = Arc::new(LocationTracker::new("/dashboard"));

	gateway.subscribe(location.clone());
	gateway.subscribe(Arc::new(|event: &SessionEvent| {
		println!("Session event: {}.", event.as_str());
	}));
	gateway.login("ada@example.com", "correct horse", "manager").await?;

	for task in gateway.my_tasks().await? {
		println!(
			"#{} {} [{}]",
			task.id,
			task.title,
			task.status.as_deref().unwrap_or("unknown")
		);
	}

	println!(
		"Resubmitted {} request(s) after {} refresh call(s); still at {}.",
		gateway.metrics.resubmits(),
		gateway.metrics.refresh_attempts(),
		location.current()
	);

	login_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	tasks_mock.assert_async().await;

	Ok(())
}
