// crates.io
use time::macros;
// self
use taskdesk_client::{
	auth::CredentialPair,
	store::{CredentialStore, MemoryStore},
};

fn build_pair(access: &str, refresh: &str) -> CredentialPair {
	CredentialPair::new(access, refresh).with_issued_at(macros::datetime!(2026-03-02 09:30 UTC))
}

#[tokio::test]
async fn save_and_load_round_trip() {
	let store = MemoryStore::default();
	let pair = build_pair("access-1", "refresh-1");

	assert!(store.load().await.expect("Loading an empty store should succeed.").is_none());

	store.save(pair.clone()).await.expect("Saving the pair should succeed.");

	let loaded = store
		.load()
		.await
		.expect("Loading the pair should succeed.")
		.expect("Stored pair should remain present.");

	assert_eq!(loaded, pair);
}

#[tokio::test]
async fn save_replaces_whole_pair_and_clones_share_it() {
	let store = MemoryStore::with_pair(build_pair("access-old", "refresh-old"));
	let handle = store.clone();

	handle.save(build_pair("access-new", "refresh-new")).await.expect("Saving should succeed.");

	let loaded = store.snapshot().expect("Replacement pair should be visible to every clone.");

	assert_eq!(loaded.access_token.expose(), "access-new");
	assert_eq!(loaded.refresh_token.expose(), "refresh-new");
}

#[tokio::test]
async fn clear_is_idempotent() {
	let store = MemoryStore::with_pair(build_pair("access", "refresh"));

	store.clear().await.expect("Clearing a populated store should succeed.");
	store.clear().await.expect("Clearing an empty store should succeed.");

	assert!(store.snapshot().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_saves_never_mix_pairs() {
	let store = MemoryStore::default();
	let store_a = store.clone();
	let store_b = store.clone();
	let task_a = tokio::spawn(async move {
		for _ in 0..64 {
			store_a.save(build_pair("access-a", "refresh-a")).await.expect("Save A should succeed.");
		}
	});
	let task_b = tokio::spawn(async move {
		for _ in 0..64 {
			store_b.save(build_pair("access-b", "refresh-b")).await.expect("Save B should succeed.");
		}
	});
	let (outcome_a, outcome_b) = tokio::join!(task_a, task_b);

	outcome_a.expect("Save task A should not panic.");
	outcome_b.expect("Save task B should not panic.");

	let last = store.snapshot().expect("One of the pairs should be stored.");

	assert!(matches!(
		(last.access_token.expose(), last.refresh_token.expose()),
		("access-a", "refresh-a") | ("access-b", "refresh-b")
	));
}
