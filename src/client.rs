//! Bearer-token injecting GraphQL client.
//!
//! [`GqlClient`] decorates a [`QueryTransport`]: before each call it asks the bound
//! [`TokenProvider`] for the current credential and, when one exists, sends it as
//! `Authorization: Bearer <token>`. Authentication is best effort. Whatever goes wrong while
//! acquiring the credential, the request still goes out, just without the header. Transport
//! failures are a separate domain and always reach the caller untouched.

// crates.io
use http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	obs::{
		self, CredentialOutcome, RequestOutcome, RequestSpan, record_credential_outcome,
		record_request_outcome,
	},
	provider::TokenProvider,
	transport::{GraphQlRequest, QueryTransport, RequestHeaders},
};
#[cfg(feature = "reqwest")]
use crate::{
	config::ClientConfig,
	provider::CookieTokenProvider,
	store::JarCookieStore,
	transport::ReqwestTransport,
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestGqlClient = GqlClient<ReqwestTransport>;

/// Provider plus the identifier it is invoked with.
struct TokenBinding {
	provider: Arc<dyn TokenProvider>,
	identifier: String,
}

/// GraphQL client that attaches the current bearer credential to every request.
///
/// The client owns its transport and at most one provider binding. Rebinding swaps the whole
/// binding at once; in-flight requests keep the binding they started with. Clones share both the
/// transport and the binding slot, so reconfiguring one handle reconfigures all of them.
pub struct GqlClient<C>
where
	C: ?Sized + QueryTransport,
{
	transport: Arc<C>,
	binding: Arc<RwLock<Option<Arc<TokenBinding>>>>,
}
impl<C> GqlClient<C>
where
	C: ?Sized + QueryTransport,
{
	/// Wraps `transport` without a token provider; requests go out unauthenticated until one is
	/// bound.
	pub fn new(transport: impl Into<Arc<C>>) -> Self {
		Self { transport: transport.into(), binding: Default::default() }
	}

	/// Underlying transport.
	pub fn transport(&self) -> &Arc<C> {
		&self.transport
	}

	/// Binds `provider`, invoked with `identifier` (cookie name, storage key, ...) on every
	/// request. Replaces any previous binding and returns `self` for chaining.
	pub fn set_token_provider(
		&self,
		provider: Arc<dyn TokenProvider>,
		identifier: impl Into<String>,
	) -> &Self {
		let binding = TokenBinding { provider, identifier: identifier.into() };

		*self.binding.write() = Some(Arc::new(binding));

		self
	}

	/// By-value form of [`GqlClient::set_token_provider`] for builder-style construction.
	pub fn with_token_provider(
		self,
		provider: Arc<dyn TokenProvider>,
		identifier: impl Into<String>,
	) -> Self {
		self.set_token_provider(provider, identifier);

		self
	}

	/// Removes the provider binding; subsequent requests go out unauthenticated.
	pub fn clear_token_provider(&self) -> &Self {
		*self.binding.write() = None;

		self
	}

	/// Whether a provider is currently bound.
	pub fn has_token_provider(&self) -> bool {
		self.binding.read().is_some()
	}

	/// Sends `request` with `headers` plus the current bearer credential and returns the
	/// response's `data`.
	///
	/// Credential acquisition never fails the call. Header normalization and transport errors
	/// are returned as they are.
	pub async fn execute(
		&self,
		request: &GraphQlRequest,
		headers: impl Into<RequestHeaders>,
	) -> Result<Value> {
		self.dispatch(request, headers.into(), "execute").await
	}

	/// [`GqlClient::execute`] followed by deserializing `data` into `T`.
	pub async fn request<T>(
		&self,
		request: &GraphQlRequest,
		headers: impl Into<RequestHeaders>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let data = self.dispatch(request, headers.into(), "request").await?;

		serde_path_to_error::deserialize(data)
			.map_err(|source| TransportError::Decode { source, status: None }.into())
	}

	async fn dispatch(
		&self,
		request: &GraphQlRequest,
		headers: RequestHeaders,
		stage: &'static str,
	) -> Result<Value> {
		let span = RequestSpan::new(request.operation_name.as_deref(), stage);

		span.instrument(async move {
			let result = self.execute_inner(request, headers).await;

			record_request_outcome(match result {
				Ok(_) => RequestOutcome::Success,
				Err(_) => RequestOutcome::Failure,
			});

			result
		})
		.await
	}

	async fn execute_inner(
		&self,
		request: &GraphQlRequest,
		headers: RequestHeaders,
	) -> Result<Value> {
		let mut headers = headers.normalize()?;

		self.authorize(&mut headers).await;

		Ok(self.transport.execute(request, headers).await?)
	}

	/// Runs the credential step; every failure in here degrades to "no credential".
	async fn authorize(&self, headers: &mut HeaderMap) {
		let Some(binding) = self.current_binding() else {
			finish_credential_step(CredentialOutcome::Unbound, None);

			return;
		};

		match binding.provider.fetch(&binding.identifier).await {
			Ok(Some(credential)) => match credential.token().bearer_header_value() {
				Ok(value) => {
					headers.insert(AUTHORIZATION, value);
					finish_credential_step(CredentialOutcome::Attached, None);
				},
				Err(e) => finish_credential_step(CredentialOutcome::Failed, Some(&e)),
			},
			Ok(None) => finish_credential_step(CredentialOutcome::Absent, None),
			Err(e) => finish_credential_step(CredentialOutcome::Failed, Some(&e)),
		}
	}

	fn current_binding(&self) -> Option<Arc<TokenBinding>> {
		self.binding.read().clone()
	}
}
#[cfg(feature = "reqwest")]
impl GqlClient<ReqwestTransport> {
	/// Builds the application client described by `config` with a fresh cookie jar.
	pub fn from_config(config: &ClientConfig) -> Result<Self> {
		Self::from_config_with_jar(config, Default::default())
	}

	/// Builds the application client described by `config`.
	///
	/// The reqwest transport and the bound [`CookieTokenProvider`] share `jar`, so the access
	/// token cookie set by the API (or seeded by the caller) becomes the bearer credential of
	/// the following requests.
	pub fn from_config_with_jar(
		config: &ClientConfig,
		jar: Arc<reqwest::cookie::Jar>,
	) -> Result<Self> {
		Self::from_config_with_builder(config, ReqwestClient::builder(), jar)
	}

	/// [`GqlClient::from_config_with_jar`] on top of a caller-tuned reqwest `builder`.
	pub fn from_config_with_builder(
		config: &ClientConfig,
		builder: reqwest::ClientBuilder,
		jar: Arc<reqwest::cookie::Jar>,
	) -> Result<Self> {
		let options = config.transport_options();
		let cookies = Arc::new(JarCookieStore::new(Arc::clone(&jar), options.endpoint.clone()));
		let transport = ReqwestTransport::with_builder(options, builder, jar)?;

		let provider = Arc::new(CookieTokenProvider::new(cookies));

		Ok(Self::new(transport).with_token_provider(provider, &config.access_token_cookie))
	}
}
impl<C> Clone for GqlClient<C>
where
	C: ?Sized + QueryTransport,
{
	fn clone(&self) -> Self {
		Self { transport: Arc::clone(&self.transport), binding: Arc::clone(&self.binding) }
	}
}
impl<C> Debug for GqlClient<C>
where
	C: ?Sized + QueryTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let identifier = self.current_binding().map(|binding| binding.identifier.clone());

		f.debug_struct("GqlClient").field("token_identifier", &identifier).finish()
	}
}

fn finish_credential_step(outcome: CredentialOutcome, error: Option<&dyn StdError>) {
	obs::trace_credential_outcome(outcome, error);
	record_credential_outcome(outcome);
}
