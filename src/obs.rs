//! Optional observability helpers for client requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every [`GqlClient::execute`](crate::client::GqlClient::execute) in a
//!   span named `gql_bearer_client.request` (fields `operation`, `stage`) and to emit debug events
//!   describing how the credential step ended. Token values are never recorded.
//! - Enable `metrics` to increment `gql_bearer_client_credential_total` (labeled by `outcome`) for
//!   every credential lookup and `gql_bearer_client_request_total` (labeled by `outcome`) for every
//!   request.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// How the credential step of a request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialOutcome {
	/// A token was found and attached as a bearer credential.
	Attached,
	/// The provider reported no credential.
	Absent,
	/// The provider failed (or the token could not form a header); the request went out
	/// unauthenticated.
	Failed,
	/// No provider is bound to the client.
	Unbound,
}
impl CredentialOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialOutcome::Attached => "attached",
			CredentialOutcome::Absent => "absent",
			CredentialOutcome::Failed => "failed",
			CredentialOutcome::Unbound => "unbound",
		}
	}
}
impl Display for CredentialOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// The transport returned data.
	Success,
	/// The transport (or header normalization) failed.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
