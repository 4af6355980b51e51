#![cfg(feature = "reqwest")]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
use serde_json::json;
// self
use taskdesk_client::{
	auth::CredentialPair,
	config::GatewayConfig,
	gateway::ReqwestGateway,
	session::{LocationTracker, SessionEvent},
	store::{CredentialStore, MemoryStore},
};

fn build_gateway(
	server: &MockServer,
	seed: Option<CredentialPair>,
) -> (ReqwestGateway, Arc<MemoryStore>, Arc<LocationTracker>) {
	let store = Arc::new(seed.map(MemoryStore::with_pair).unwrap_or_default());
	let config =
		GatewayConfig::new(&server.url("/api")).expect("Mock base URL should parse successfully.");
	let gateway =
		ReqwestGateway::new(config, store.clone()).expect("Reqwest gateway should build.");
	let tracker = Arc::new(LocationTracker::new("/tasks/my"));

	gateway.subscribe(tracker.clone());

	(gateway, store, tracker)
}

fn task_list() -> serde_json::Value {
	json!([{ "id": 1, "title": "Prepare onboarding checklist", "status": "pending" }])
}

#[tokio::test]
async fn expired_credential_is_refreshed_and_request_resubmitted() {
	let server = MockServer::start_async().await;
	let (gateway, store, tracker) =
		build_gateway(&server, Some(CredentialPair::new("expiredTok", "goodRefresh")));
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks").header("authorization", "Bearer expiredTok");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh")
				.json_body(json!({ "refreshToken": "goodRefresh" }));
			then.status(200).json_body(json!({ "token": "freshTok", "refreshToken": "freshRefresh" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks").header("authorization", "Bearer freshTok");
			then.status(200).json_body(task_list());
		})
		.await;
	let tasks = gateway.tasks().await.expect("Recovered request should return the task list.");

	assert_eq!(tasks.len(), 1);
	assert_eq!(tasks[0].title, "Prepare onboarding checklist");

	rejected.assert_async().await;
	refresh.assert_async().await;
	accepted.assert_async().await;

	let stored = store.snapshot().expect("Rotated pair should be stored.");

	assert_eq!(stored.access_token.expose(), "freshTok");
	assert_eq!(stored.refresh_token.expose(), "freshRefresh");
	assert_eq!(tracker.current(), "/tasks/my");
}

#[tokio::test]
async fn missing_credentials_redirect_to_login() {
	let server = MockServer::start_async().await;
	let (gateway, store, tracker) = build_gateway(&server, None);
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/leaves");
			then.status(401).json_body(json!({ "message": "Authentication required" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "unused", "refreshToken": "unused" }));
		})
		.await;
	let err = gateway.leaves().await.expect_err("The request must fail without credentials.");

	assert!(err.is_session_expired());

	rejected.assert_async().await;
	refresh.assert_calls_async(0).await;

	assert!(store.load().await.expect("Store load should succeed.").is_none());
	assert_eq!(tracker.current(), "/login");
}

#[tokio::test]
async fn failed_refresh_clears_both_credentials() {
	let server = MockServer::start_async().await;
	let (gateway, store, tracker) =
		build_gateway(&server, Some(CredentialPair::new("expiredTok", "revokedRefresh")));
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks/team");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).json_body(json!({ "message": "Refresh token revoked" }));
		})
		.await;
	let err = gateway.team_tasks().await.expect_err("A rejected refresh must fail the request.");

	assert!(err.is_session_expired());
	assert_eq!(err.message_or("Failed to fetch team tasks"), "Refresh token revoked");

	rejected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;

	assert!(store.snapshot().is_none());
	assert_eq!(tracker.current(), "/login");
	assert_eq!(gateway.metrics.expirations(), 1);
}

#[tokio::test]
async fn rejection_after_resubmit_is_final() {
	let server = MockServer::start_async().await;
	let (gateway, store, tracker) =
		build_gateway(&server, Some(CredentialPair::new("expiredTok", "goodRefresh")));
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users");
			then.status(401).json_body(json!({ "message": "Admins only" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "freshTok", "refreshToken": "freshRefresh" }));
		})
		.await;
	let err = gateway.users().await.expect_err("The second 401 must reach the caller.");

	assert!(!err.is_session_expired());
	assert_eq!(err.status(), Some(401));
	assert_eq!(err.message_or("Failed to fetch users"), "Admins only");

	rejected.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;

	assert!(store.snapshot().is_some());
	assert_eq!(tracker.current(), "/tasks/my");
}

#[tokio::test]
async fn non_auth_failures_are_not_retried() {
	let server = MockServer::start_async().await;
	let (gateway, _, _) =
		build_gateway(&server, Some(CredentialPair::new("freshTok", "freshRefresh")));
	let failing = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks/404");
			then.status(404).json_body(json!({ "message": "Task not found" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "x", "refreshToken": "y" }));
		})
		.await;
	let err = gateway.task(404).await.expect_err("A 404 must reach the caller.");

	assert_eq!(err.status(), Some(404));
	assert_eq!(err.message_or("Failed to fetch task"), "Task not found");

	failing.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rejections_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (gateway, store, _) =
		build_gateway(&server, Some(CredentialPair::new("expiredTok", "goodRefresh")));
	let _rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/leaves/my").header("authorization", "Bearer expiredTok");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "freshTok", "refreshToken": "freshRefresh" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/leaves/my").header("authorization", "Bearer freshTok");
			then.status(200).json_body(json!([]));
		})
		.await;
	let handles = (0..4)
		.map(|_| {
			let gateway = gateway.clone();

			tokio::spawn(async move { gateway.my_leaves().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let leaves = handle
			.await
			.expect("Request task should not panic.")
			.expect("Every concurrent request should recover.");

		assert!(leaves.is_empty());
	}

	refresh.assert_calls_async(1).await;
	accepted.assert_calls_async(4).await;

	assert_eq!(
		store.snapshot().map(|pair| pair.access_token.expose().to_owned()),
		Some("freshTok".into())
	);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rejections_share_one_failed_refresh() {
	let server = MockServer::start_async().await;
	let (gateway, store, tracker) =
		build_gateway(&server, Some(CredentialPair::new("expiredTok", "revokedRefresh")));
	let expired = Arc::new(Mutex::new(Vec::new()));
	let sink = expired.clone();

	gateway.subscribe(Arc::new(move |event: &SessionEvent| {
		if matches!(event, SessionEvent::Expired { .. }) {
			sink.lock().push(event.clone());
		}
	}));

	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/leaves/team");
			then.status(401).json_body(json!({ "message": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401)
				.delay(Duration::from_millis(200))
				.json_body(json!({ "message": "Refresh token revoked" }));
		})
		.await;
	let handles = (0..4)
		.map(|_| {
			let gateway = gateway.clone();

			tokio::spawn(async move { gateway.team_leaves().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let err = handle
			.await
			.expect("Request task should not panic.")
			.expect_err("Every concurrent request should see the expiry.");

		assert!(err.is_session_expired());
		assert_eq!(err.message_or("Failed to fetch team leaves"), "Refresh token revoked");
	}

	refresh.assert_calls_async(1).await;
	rejected.assert_calls_async(4).await;

	assert!(store.snapshot().is_none());
	assert_eq!(tracker.current(), "/login");
	assert_eq!(gateway.metrics.expirations(), 1);
	assert_eq!(expired.lock().len(), 1);
}
