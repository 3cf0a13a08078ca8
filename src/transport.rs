//! Query transport primitives.
//!
//! [`QueryTransport`] is the client's only dependency on an HTTP stack: it receives a
//! [`GraphQlRequest`] plus the final header set and resolves to the response's `data` member.
//! The crate ships [`ReqwestTransport`] behind the default `reqwest` feature; tests and
//! embedders plug in their own implementations.

pub mod headers;
#[cfg(feature = "reqwest")] mod reqwest_transport;

pub use headers::RequestHeaders;
#[cfg(feature = "reqwest")] pub use reqwest_transport::ReqwestTransport;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`QueryTransport::execute`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Executes GraphQL documents against a fixed endpoint.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back a process-wide
/// client shared across tasks. Errors are returned as-is to the caller of
/// [`GqlClient::execute`](crate::client::GqlClient::execute); implementations must not retry.
pub trait QueryTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` with exactly `headers` and resolves to the response `data`.
	fn execute<'a>(
		&'a self,
		request: &'a GraphQlRequest,
		headers: HeaderMap,
	) -> TransportFuture<'a, Value>;
}

/// GraphQL-over-HTTP request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
	/// Query or mutation document.
	pub query: String,
	/// Variables referenced by the document.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub variables: Option<Value>,
	/// Operation to run when the document defines several.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub operation_name: Option<String>,
}
impl GraphQlRequest {
	/// Creates a request for `query` without variables.
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), variables: None, operation_name: None }
	}

	/// Attaches already-encoded variables.
	pub fn with_variables(mut self, variables: Value) -> Self {
		self.variables = Some(variables);

		self
	}

	/// Serializes and attaches typed variables.
	pub fn try_with_variables<V>(self, variables: &V) -> Result<Self, ConfigError>
	where
		V: ?Sized + Serialize,
	{
		let variables = serde_json::to_value(variables).map_err(ConfigError::Variables)?;

		Ok(self.with_variables(variables))
	}

	/// Selects the operation to run.
	pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
		self.operation_name = Some(name.into());

		self
	}
}
impl From<&str> for GraphQlRequest {
	fn from(query: &str) -> Self {
		Self::new(query)
	}
}
impl From<String> for GraphQlRequest {
	fn from(query: String) -> Self {
		Self::new(query)
	}
}

/// Entry of a GraphQL response's `errors` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
	/// Human-readable message.
	pub message: String,
	/// Source locations the error refers to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locations: Option<Vec<Value>>,
	/// Response path of the failing field.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<Vec<Value>>,
	/// Server-defined extensions (error codes, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extensions: Option<Value>,
}
impl GraphQlError {
	/// Creates an error carrying only a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), locations: None, path: None, extensions: None }
	}
}

/// GraphQL-over-HTTP response body.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphQlResponse {
	/// Result payload.
	#[serde(default)]
	pub data: Option<Value>,
	/// Errors reported by the server.
	#[serde(default)]
	pub errors: Option<Vec<GraphQlError>>,
}
impl GraphQlResponse {
	/// Parses a response body, tracking the JSON path of any mismatch.
	pub fn from_slice(body: &[u8], status: Option<u16>) -> Result<Self, TransportError> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| TransportError::Decode { source, status })
	}

	/// Resolves to `data`, or fails when the server reported errors.
	pub fn into_result(self) -> Result<Value, TransportError> {
		match self.errors {
			Some(errors) if !errors.is_empty() =>
				Err(TransportError::GraphQl { errors, data: self.data }),
			_ => Ok(self.data.unwrap_or(Value::Null)),
		}
	}
}

/// Fixed transport-level options, chosen once when the transport is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOptions {
	/// GraphQL endpoint every request is sent to.
	pub endpoint: Url,
	/// Whether ambient cookies travel with requests.
	#[serde(default)]
	pub credentials: CredentialsMode,
	/// Cross-origin mode announced with each request.
	#[serde(default)]
	pub mode: RequestMode,
}
impl TransportOptions {
	/// Creates options for `endpoint` with the client defaults (`include`, `cors`).
	pub fn new(endpoint: Url) -> Self {
		Self { endpoint, credentials: CredentialsMode::default(), mode: RequestMode::default() }
	}

	/// Overrides the credentials mode.
	pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
		self.credentials = credentials;

		self
	}

	/// Overrides the request mode.
	pub fn with_mode(mut self, mode: RequestMode) -> Self {
		self.mode = mode;

		self
	}
}

macro_rules! def_label_enum {
	($name:ident, $doc:literal, $default:ident, $($variant:ident => $label:literal, $vdoc:literal),+ $(,)?) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				#[doc = $vdoc]
				#[serde(rename = $label)]
				$variant,
			)+
		}
		impl $name {
			/// Returns the fetch-standard label for the mode.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)+
				}
			}
		}
		impl Default for $name {
			fn default() -> Self {
				Self::$default
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = UnknownModeError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s.trim() {
					$($label => Ok(Self::$variant),)+
					other => Err(UnknownModeError { kind: stringify!($name), value: other.to_owned() }),
				}
			}
		}
	};
}

def_label_enum!(
	CredentialsMode,
	"Cookie inclusion policy, named after the fetch `credentials` option.",
	Include,
	Omit => "omit", "Never attach cookies.",
	SameOrigin => "same-origin", "Attach cookies to same-origin requests; the endpoint is fixed, so every request qualifies.",
	Include => "include", "Always attach cookies.",
);
def_label_enum!(
	RequestMode,
	"Cross-origin policy, named after the fetch `mode` option and sent as `Sec-Fetch-Mode`.",
	Cors,
	Cors => "cors", "Regular cross-origin request.",
	NoCors => "no-cors", "Opaque cross-origin request.",
	SameOrigin => "same-origin", "Same-origin only.",
);

impl CredentialsMode {
	/// Whether the transport should attach its cookie jar.
	pub const fn attaches_cookies(self) -> bool {
		!matches!(self, Self::Omit)
	}
}

/// Raised when parsing an unknown [`CredentialsMode`] or [`RequestMode`] label.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown {kind} value `{value}`.")]
pub struct UnknownModeError {
	/// Enum being parsed.
	pub kind: &'static str,
	/// Rejected input.
	pub value: String,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn request_serializes_as_graphql_over_http_body() {
		let request = GraphQlRequest::new("query Me { me { id } }")
			.try_with_variables(&json!({ "first": 10 }))
			.expect("JSON variables always serialize.")
			.with_operation_name("Me");
		let body = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(
			body,
			json!({
				"query": "query Me { me { id } }",
				"variables": { "first": 10 },
				"operationName": "Me",
			})
		);
		assert_eq!(
			serde_json::to_value(GraphQlRequest::from("{ ping }")).expect("Request should serialize."),
			json!({ "query": "{ ping }" })
		);
	}

	#[test]
	fn response_with_errors_fails_and_keeps_partial_data() {
		let body = br#"{"data":{"me":null},"errors":[{"message":"Not authorized","path":["me"]}]}"#;
		let err = GraphQlResponse::from_slice(body, Some(200))
			.expect("Body should parse.")
			.into_result()
			.expect_err("Errors must fail the response.");

		match err {
			TransportError::GraphQl { errors, data } => {
				assert_eq!(errors[0].message, "Not authorized");
				assert_eq!(errors[0].path, Some(vec![json!("me")]));
				assert_eq!(data, Some(json!({ "me": null })));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn response_without_errors_yields_data() {
		let data = GraphQlResponse::from_slice(br#"{"data":{"ping":"pong"},"errors":[]}"#, None)
			.expect("Body should parse.")
			.into_result()
			.expect("Empty errors array is a success.");

		assert_eq!(data, json!({ "ping": "pong" }));
	}

	#[test]
	fn malformed_response_reports_path() {
		let err = GraphQlResponse::from_slice(br#"{"errors":[{"message":5}]}"#, Some(200))
			.expect_err("Numeric message must fail.");

		match err {
			TransportError::Decode { source, status } => {
				assert_eq!(status, Some(200));
				assert_eq!(source.path().to_string(), "errors[0].message");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn modes_parse_and_render_fetch_labels() {
		assert_eq!("include".parse::<CredentialsMode>(), Ok(CredentialsMode::Include));
		assert_eq!("no-cors".parse::<RequestMode>(), Ok(RequestMode::NoCors));
		assert_eq!(RequestMode::SameOrigin.to_string(), "same-origin");
		assert!(!CredentialsMode::Omit.attaches_cookies());
		assert!(CredentialsMode::SameOrigin.attaches_cookies());
		assert_eq!(
			"sometimes".parse::<CredentialsMode>(),
			Err(UnknownModeError { kind: "CredentialsMode", value: "sometimes".into() })
		);

		let options: TransportOptions = serde_json::from_value(json!({
			"endpoint": "https://api.example.com/graphql",
		}))
		.expect("Options should deserialize.");

		assert_eq!(options.credentials, CredentialsMode::Include);
		assert_eq!(options.mode, RequestMode::Cors);
		assert_eq!(TransportOptions::new(options.endpoint.clone()), options);
	}
}
