//! Demonstrates plugging a custom [`QueryTransport`] and a local-storage token provider into
//! [`GqlClient`].
//!
//! 1. Implement [`QueryTransport`]; the client hands it the final header set.
//! 2. Keep the token in any [`KeyValueStore`]; here an in-memory one stands in for disk.
//! 3. Bind a [`LocalStorageTokenProvider`] under the storage key and run queries.

// std
use std::sync::Arc;
// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use serde_json::{Value, json};
// self
use gql_bearer_client::{
	client::GqlClient,
	http::{HeaderMap, header::AUTHORIZATION},
	provider::LocalStorageTokenProvider,
	store::{KeyValueStore, MemoryKeyValueStore},
	transport::{GraphQlRequest, QueryTransport, RequestHeaders, TransportFuture},
};

/// Answers every query locally, echoing who it was authenticated as.
struct EchoTransport;
impl QueryTransport for EchoTransport {
	fn execute<'a>(
		&'a self,
		request: &'a GraphQlRequest,
		headers: HeaderMap,
	) -> TransportFuture<'a, Value> {
		Box::pin(async move {
			let authorization =
				headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_owned);

			Ok(json!({ "query": request.query, "authorization": authorization }))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let storage = Arc::new(MemoryKeyValueStore::default());
	let client = <GqlClient<EchoTransport>>::new(EchoTransport).with_token_provider(
		Arc::new(LocalStorageTokenProvider::new(Arc::clone(&storage))),
		"auth.token",
	);

	println!("Anonymous: {}.", client.execute(&"{ ping }".into(), RequestHeaders::default()).await?);

	let token = format!(
		"{}.{}.c2lnbmF0dXJl",
		URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
		URL_SAFE_NO_PAD.encode(json!({ "sub": "desktop-user" }).to_string()),
	);

	storage.set_item("auth.token", &token)?;

	println!("Signed in: {}.", client.execute(&"{ me { id } }".into(), None::<HeaderMap>).await?);

	storage.remove_item("auth.token")?;

	println!("Signed out: {}.", client.execute(&"{ ping }".into(), RequestHeaders::default()).await?);

	Ok(())
}
