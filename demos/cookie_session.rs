//! Demonstrates the application client built from configuration: the API's `Set-Cookie`
//! response seeds the shared cookie jar and every following query carries that token as its
//! bearer credential.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use gql_bearer_client::{
	client::ReqwestGqlClient,
	config::ClientConfig,
	reqwest::Client,
	transport::{CredentialsMode, GraphQlRequest, RequestHeaders},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token = format!(
		"{}.{}.c2lnbmF0dXJl",
		URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
		URL_SAFE_NO_PAD.encode(json!({ "sub": "demo-user" }).to_string()),
	);
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql").header_missing("authorization");
			then.status(200)
				.header("set-cookie", format!("access_token={token}; Path=/; HttpOnly"))
				.json_body(json!({ "data": { "login": { "ok": true } } }));
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/graphql").header("authorization", format!("Bearer {token}"));
			then.status(200).json_body(json!({ "data": { "me": { "id": "demo-user" } } }));
		})
		.await;
	let config = ClientConfig::builder()
		.endpoint_str(&server.url("/graphql"))?
		.credentials(CredentialsMode::Include)
		.build()?;
	// httpmock serves a self-signed certificate.
	let client = ReqwestGqlClient::from_config_with_builder(
		&config,
		Client::builder().danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true),
		Default::default(),
	)?;
	let login = GraphQlRequest::new("mutation Login($user: String!) { login(user: $user) { ok } }")
		.try_with_variables(&json!({ "user": "demo-user" }))?
		.with_operation_name("Login");

	println!("Login: {}.", client.execute(&login, RequestHeaders::default()).await?);
	println!("Me: {}.", client.execute(&"{ me { id } }".into(), [("x-demo", "1")]).await?);

	login_mock.assert_async().await;
	me_mock.assert_async().await;

	Ok(())
}
