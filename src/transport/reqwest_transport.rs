// crates.io
use http::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{ClientBuilder, cookie::Jar};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	transport::{GraphQlRequest, GraphQlResponse, QueryTransport, TransportFuture, TransportOptions},
};

const SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
const GRAPHQL_ACCEPT: &str = "application/graphql-response+json, application/json";

/// GraphQL-over-HTTP transport built on reqwest.
///
/// The endpoint, credentials mode, and request mode are fixed at construction. Redirects follow
/// reqwest's defaults and nothing is retried.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	options: TransportOptions,
}
impl ReqwestTransport {
	/// Builds a transport with a private cookie jar.
	pub fn new(options: TransportOptions) -> Result<Self, ConfigError> {
		Self::with_cookie_jar(options, Arc::new(Jar::default()))
	}

	/// Builds a transport that reads and updates `jar` unless cookies are omitted.
	pub fn with_cookie_jar(options: TransportOptions, jar: Arc<Jar>) -> Result<Self, ConfigError> {
		Self::with_builder(options, ReqwestClient::builder(), jar)
	}

	/// Finishes a caller-tuned reqwest `builder` (TLS roots, proxies, timeouts, ...) and attaches
	/// `jar` unless cookies are omitted.
	pub fn with_builder(
		options: TransportOptions,
		mut builder: ClientBuilder,
		jar: Arc<Jar>,
	) -> Result<Self, ConfigError> {
		if options.credentials.attaches_cookies() {
			builder = builder.cookie_provider(jar);
		}

		Ok(Self { client: builder.build()?, options })
	}

	/// Wraps a preconfigured reqwest [`ReqwestClient`]; its own cookie settings win over
	/// [`TransportOptions::credentials`].
	pub fn with_client(client: ReqwestClient, options: TransportOptions) -> Self {
		Self { client, options }
	}

	/// Options the transport was built with.
	pub fn options(&self) -> &TransportOptions {
		&self.options
	}
}
impl QueryTransport for ReqwestTransport {
	fn execute<'a>(
		&'a self,
		request: &'a GraphQlRequest,
		mut headers: HeaderMap,
	) -> TransportFuture<'a, Value> {
		Box::pin(async move {
			headers.entry(ACCEPT).or_insert(HeaderValue::from_static(GRAPHQL_ACCEPT));
			headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
			headers.insert(SEC_FETCH_MODE, HeaderValue::from_static(self.options.mode.as_str()));

			let response = self
				.client
				.post(self.options.endpoint.clone())
				.headers(headers)
				.json(request)
				.send()
				.await?;
			let status = response.status();
			let body = response.bytes().await?;

			if !status.is_success() {
				return Err(TransportError::Status {
					status: status.as_u16(),
					body: String::from_utf8_lossy(&body).into_owned(),
				});
			}

			GraphQlResponse::from_slice(&body, Some(status.as_u16()))?.into_result()
		})
	}
}
