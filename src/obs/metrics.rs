// self
use crate::obs::{CredentialOutcome, RequestOutcome};

/// Records a credential lookup outcome via the global metrics recorder (when enabled).
pub fn record_credential_outcome(outcome: CredentialOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("gql_bearer_client_credential_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("gql_bearer_client_request_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
