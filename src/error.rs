//! Client-level error types returned by [`GqlClient`](crate::client::GqlClient) and transports.
//!
//! Credential failures never appear here: they live in
//! [`CredentialError`](crate::provider::CredentialError) and are absorbed by the client before a
//! request is dispatched.

// self
use crate::{_prelude::*, transport::GraphQlError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport, HTTP, or GraphQL failure reported by the underlying query transport.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and request-construction failures raised before anything is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Caller supplied a header name that is not a valid HTTP token.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// Caller supplied a header value that cannot be sent over HTTP.
	#[error("Header `{name}` carries an invalid value.")]
	InvalidHeaderValue {
		/// Header whose value failed validation.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Query variables could not be serialized to JSON.
	#[error("Query variables could not be serialized.")]
	Variables(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures produced while executing a query against the GraphQL endpoint.
///
/// The client forwards these unchanged: they are never retried and never swallowed.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the GraphQL endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Endpoint answered with a non-success HTTP status.
	#[error("GraphQL endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body, kept for diagnostics.
		body: String,
	},
	/// Endpoint answered successfully but reported GraphQL errors.
	#[error("GraphQL endpoint returned {} error(s): {}.", .errors.len(), first_message(.errors))]
	GraphQl {
		/// Errors reported in the response's `errors` array.
		errors: Vec<GraphQlError>,
		/// Partial `data` returned alongside the errors, if any.
		data: Option<Value>,
	},
	/// Response body (or its `data` member) did not match the expected shape.
	#[error("GraphQL response could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when the failure came straight from a response body.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the HTTP status associated with the failure, when known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Decode { status, .. } => *status,
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn first_message(errors: &[GraphQlError]) -> &str {
	errors.first().map(|e| e.message.as_str()).unwrap_or("no message")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn transport_error_converts_into_client_error_with_status() {
		let transport = TransportError::Status { status: 500, body: "boom".into() };
		let error: Error = transport.into();

		assert!(matches!(error, Error::Transport(TransportError::Status { status: 500, .. })));
		assert_eq!(error.to_string(), "GraphQL endpoint responded with HTTP 500.");
	}

	#[test]
	fn graphql_error_message_lists_first_entry() {
		let error = TransportError::GraphQl {
			errors: vec![GraphQlError::new("Not authorized"), GraphQlError::new("Second")],
			data: None,
		};

		assert_eq!(error.to_string(), "GraphQL endpoint returned 2 error(s): Not authorized.");
		assert_eq!(error.status(), None);
	}

	#[test]
	fn header_errors_expose_source() {
		let source = HeaderName::from_bytes(b"bad header")
			.expect_err("Header names with spaces must be rejected.");
		let error = ConfigError::InvalidHeaderName { name: "bad header".into(), source };

		assert!(StdError::source(&error).is_some());
		assert_eq!(error.to_string(), "Header name `bad header` is invalid.");
	}
}
