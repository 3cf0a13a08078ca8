//! Application-level client configuration.

// self
use crate::{
	_prelude::*,
	transport::{CredentialsMode, RequestMode, TransportOptions, UnknownModeError},
};

/// Environment variable holding the GraphQL endpoint.
pub const ENV_ENDPOINT: &str = "GQL_BEARER_ENDPOINT";
/// Environment variable naming the access token cookie.
pub const ENV_ACCESS_TOKEN_COOKIE: &str = "GQL_BEARER_ACCESS_TOKEN_COOKIE";
/// Environment variable selecting the credentials mode.
pub const ENV_CREDENTIALS: &str = "GQL_BEARER_CREDENTIALS";
/// Environment variable selecting the request mode.
pub const ENV_MODE: &str = "GQL_BEARER_MODE";
/// Cookie consulted when no name is configured.
pub const DEFAULT_ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Errors raised while constructing or validating a [`ClientConfig`].
#[derive(Debug, PartialEq, ThisError)]
pub enum ClientConfigError {
	/// No endpoint was supplied.
	#[error("Missing GraphQL endpoint.")]
	MissingEndpoint,
	/// Endpoint text could not be parsed.
	#[error("GraphQL endpoint `{value}` is not a valid URL.")]
	InvalidEndpoint {
		/// Rejected input.
		value: String,
		/// Parser failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint uses something other than HTTP(S).
	#[error("GraphQL endpoint must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Endpoint that failed validation.
		url: String,
	},
	/// Cookie name is empty or contains separators.
	#[error("Access token cookie name `{name}` is not a valid cookie name.")]
	InvalidCookieName {
		/// Rejected cookie name.
		name: String,
	},
	/// Credentials or request mode label is unknown.
	#[error("Environment variable `{variable}` holds an unknown value.")]
	InvalidMode {
		/// Variable that carried the label.
		variable: &'static str,
		/// Parser failure.
		#[source]
		source: UnknownModeError,
	},
}

/// Everything needed to build the application's authenticated client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
	/// GraphQL endpoint.
	pub endpoint: Url,
	/// Cookie holding the access token.
	#[serde(default = "default_access_token_cookie")]
	pub access_token_cookie: String,
	/// Cookie inclusion policy for the transport.
	#[serde(default)]
	pub credentials: CredentialsMode,
	/// Cross-origin policy announced by the transport.
	#[serde(default)]
	pub mode: RequestMode,
}
impl ClientConfig {
	/// Starts a builder with the default cookie name and modes.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ClientConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps variable names to values.
	///
	/// Unset and blank variables fall back to their defaults; the endpoint has none.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let mut builder = Self::builder();

		if let Some(endpoint) = read(ENV_ENDPOINT) {
			builder = builder.endpoint_str(&endpoint)?;
		}
		if let Some(cookie) = read(ENV_ACCESS_TOKEN_COOKIE) {
			builder = builder.access_token_cookie(cookie);
		}
		if let Some(credentials) = read(ENV_CREDENTIALS) {
			builder = builder.credentials(parse_mode(ENV_CREDENTIALS, &credentials)?);
		}
		if let Some(mode) = read(ENV_MODE) {
			builder = builder.mode(parse_mode(ENV_MODE, &mode)?);
		}

		builder.build()
	}

	/// Transport options derived from this configuration.
	pub fn transport_options(&self) -> TransportOptions {
		TransportOptions::new(self.endpoint.clone())
			.with_credentials(self.credentials)
			.with_mode(self.mode)
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.endpoint.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: self.endpoint.to_string() });
		}
		if !is_cookie_token(&self.access_token_cookie) {
			return Err(ClientConfigError::InvalidCookieName {
				name: self.access_token_cookie.clone(),
			});
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// GraphQL endpoint; required.
	pub endpoint: Option<Url>,
	/// Cookie holding the access token.
	pub access_token_cookie: String,
	/// Cookie inclusion policy.
	pub credentials: CredentialsMode,
	/// Cross-origin policy.
	pub mode: RequestMode,
}
impl ClientConfigBuilder {
	/// Sets the endpoint.
	pub fn endpoint(mut self, url: Url) -> Self {
		self.endpoint = Some(url);

		self
	}

	/// Parses and sets the endpoint.
	pub fn endpoint_str(self, url: &str) -> Result<Self, ClientConfigError> {
		let parsed = Url::parse(url.trim()).map_err(|source| {
			ClientConfigError::InvalidEndpoint { value: url.to_owned(), source }
		})?;

		Ok(self.endpoint(parsed))
	}

	/// Overrides the access token cookie name.
	pub fn access_token_cookie(mut self, name: impl Into<String>) -> Self {
		self.access_token_cookie = name.into();

		self
	}

	/// Overrides the credentials mode.
	pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
		self.credentials = credentials;

		self
	}

	/// Overrides the request mode.
	pub fn mode(mut self, mode: RequestMode) -> Self {
		self.mode = mode;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let endpoint = self.endpoint.ok_or(ClientConfigError::MissingEndpoint)?;
		let config = ClientConfig {
			endpoint,
			access_token_cookie: self.access_token_cookie,
			credentials: self.credentials,
			mode: self.mode,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			endpoint: None,
			access_token_cookie: default_access_token_cookie(),
			credentials: CredentialsMode::default(),
			mode: RequestMode::default(),
		}
	}
}

fn default_access_token_cookie() -> String {
	DEFAULT_ACCESS_TOKEN_COOKIE.into()
}

fn parse_mode<T>(variable: &'static str, value: &str) -> Result<T, ClientConfigError>
where
	T: FromStr<Err = UnknownModeError>,
{
	value.parse().map_err(|source| ClientConfigError::InvalidMode { variable, source })
}

// RFC 6265 `cookie-name`: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
	!name.is_empty()
		&& name.bytes().all(|b| {
			b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
		})
}
