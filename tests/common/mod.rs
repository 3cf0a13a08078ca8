//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use parking_lot::Mutex;
use serde_json::Value;
// self
use gql_bearer_client::{
	error::TransportError,
	http::{HeaderMap, header::AUTHORIZATION},
	store::{Cookie, CookieStore, StoreError, StoreFuture},
	transport::{GraphQlRequest, QueryTransport, TransportFuture},
};

/// Builds an unsigned compact JWS whose payload segment encodes `claims`.
pub fn fake_jwt(claims: &Value) -> String {
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

	format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// What a [`RecordingTransport`] answers with.
#[derive(Clone, Debug)]
pub enum Reply {
	Data(Value),
	Status(u16, &'static str),
}

/// Transport that records every call and answers with a fixed [`Reply`].
#[derive(Debug)]
pub struct RecordingTransport {
	reply: Reply,
	calls: Mutex<Vec<(GraphQlRequest, HeaderMap)>>,
}
impl RecordingTransport {
	pub fn data(data: Value) -> Arc<Self> {
		Arc::new(Self { reply: Reply::Data(data), calls: Mutex::default() })
	}

	pub fn status(status: u16, body: &'static str) -> Arc<Self> {
		Arc::new(Self { reply: Reply::Status(status, body), calls: Mutex::default() })
	}

	pub fn calls(&self) -> Vec<(GraphQlRequest, HeaderMap)> {
		self.calls.lock().clone()
	}

	pub fn last_headers(&self) -> HeaderMap {
		self.calls
			.lock()
			.last()
			.map(|(_, headers)| headers.clone())
			.expect("Transport should have been called at least once.")
	}

	pub fn last_authorization(&self) -> Option<String> {
		self.last_headers().get(AUTHORIZATION).map(|value| {
			value.to_str().expect("Authorization header should be visible ASCII.").to_owned()
		})
	}
}
impl QueryTransport for RecordingTransport {
	fn execute<'a>(
		&'a self,
		request: &'a GraphQlRequest,
		headers: HeaderMap,
	) -> TransportFuture<'a, Value> {
		self.calls.lock().push((request.clone(), headers));

		let reply = self.reply.clone();

		Box::pin(async move {
			match reply {
				Reply::Data(data) => Ok(data),
				Reply::Status(status, body) =>
					Err(TransportError::Status { status, body: body.to_owned() }),
			}
		})
	}
}

/// Cookie store whose reads always fail.
#[derive(Debug, Default)]
pub struct FailingCookieStore;
impl CookieStore for FailingCookieStore {
	fn get<'a>(&'a self, _name: &'a str) -> StoreFuture<'a, Option<Cookie>> {
		Box::pin(async { Err(StoreError::Backend { message: "network error".into() }) })
	}
}
