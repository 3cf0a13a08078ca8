mod common;

// std
use std::{
	env, fs,
	path::PathBuf,
	process,
	sync::Arc,
	time::{SystemTime, UNIX_EPOCH},
};
// crates.io
use serde_json::json;
// self
use common::{FailingCookieStore, fake_jwt};
use gql_bearer_client::{
	auth::{DecodeError, decode},
	provider::{CookieTokenProvider, CredentialError, LocalStorageTokenProvider, TokenProvider},
	store::{FileKeyValueStore, KeyValueStore, MemoryCookieStore, MemoryKeyValueStore, StoreError},
};

fn temp_path(label: &str) -> PathBuf {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System clock should be after the Unix epoch.")
		.as_nanos();

	env::temp_dir().join(format!("gql_bearer_client_it_{label}_{}_{nanos}.json", process::id()))
}

#[tokio::test]
async fn cookie_provider_returns_token_with_its_own_payload() {
	let cookies = Arc::new(MemoryCookieStore::default());
	let provider = CookieTokenProvider::new(Arc::clone(&cookies));

	for claims in [
		json!({ "sub": "u1" }),
		json!({ "sub": "u2", "roles": ["admin"], "exp": 1_767_225_600 }),
		json!({}),
	] {
		let token = fake_jwt(&claims);

		cookies.set("session", token.clone());

		let credential = provider
			.fetch("session")
			.await
			.expect("Valid cookie should decode.")
			.expect("Cookie should be present.");

		assert_eq!(credential.token().expose(), token);
		assert_eq!(
			credential.payload(),
			&decode(&token).expect("Fixture token should decode.")
		);
		assert_eq!(serde_json::Value::Object(credential.payload().clone()), claims);
	}
}

#[tokio::test]
async fn both_providers_report_absence_as_none() {
	let cookies = CookieTokenProvider::new(Arc::new(MemoryCookieStore::default()));
	let storage = LocalStorageTokenProvider::new(Arc::new(MemoryKeyValueStore::default()));

	for identifier in ["session", "", "auth.token"] {
		assert!(cookies.fetch(identifier).await.expect("Absence is not an error.").is_none());
		assert!(storage.fetch(identifier).await.expect("Absence is not an error.").is_none());
	}
}

#[tokio::test]
async fn providers_surface_corruption_and_store_failures() {
	let storage = Arc::new(MemoryKeyValueStore::default());

	storage.set_item("auth.token", "a.b").expect("Memory store writes never fail.");

	let err = LocalStorageTokenProvider::new(storage)
		.fetch("auth.token")
		.await
		.expect_err("Two-segment tokens must fail to decode.");

	assert!(matches!(err, CredentialError::Decode(DecodeError::Segments { segments: 2 })));

	let err = CookieTokenProvider::new(Arc::new(FailingCookieStore))
		.fetch("session")
		.await
		.expect_err("Failing stores must surface from a direct fetch.");

	assert!(matches!(
		err,
		CredentialError::Store(StoreError::Backend { ref message }) if message == "network error"
	));
}

#[tokio::test]
async fn file_store_backs_local_storage_provider_across_handles() {
	let path = temp_path("provider");
	let writer = FileKeyValueStore::open(&path).expect("File store should open.");
	let provider = LocalStorageTokenProvider::new(Arc::new(
		FileKeyValueStore::open(&path).expect("File store should open."),
	));

	assert!(provider.fetch("auth.token").await.expect("Missing file reads as empty.").is_none());

	let token = fake_jwt(&json!({ "sub": "cli-user" }));

	writer.set_item("auth.token", &token).expect("File store write should succeed.");

	let credential = provider
		.fetch("auth.token")
		.await
		.expect("Stored token should decode.")
		.expect("Token written by the other handle should be visible.");

	assert_eq!(credential.subject(), Some("cli-user"));

	writer.remove_item("auth.token").expect("File store removal should succeed.");

	assert!(provider.fetch("auth.token").await.expect("Removal leaves a valid file.").is_none());

	fs::write(&path, b"{ not json").expect("Fixture file should be writable.");

	let err = provider.fetch("auth.token").await.expect_err("Corrupt files must fail reads.");

	assert!(matches!(err, CredentialError::Store(StoreError::Serialization { .. })));

	let _ = fs::remove_file(&path);
}
