// self
use crate::{_prelude::*, obs::CredentialOutcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping a single client request.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a span tagged with the operation name (or `anonymous`) and call site.
	pub fn new(operation: Option<&str>, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"gql_bearer_client.request",
				operation = operation.unwrap_or("anonymous"),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event describing how the credential step ended.
///
/// `error` carries the swallowed failure for [`CredentialOutcome::Failed`].
pub fn trace_credential_outcome(outcome: CredentialOutcome, error: Option<&dyn StdError>) {
	#[cfg(feature = "tracing")]
	{
		match error {
			Some(error) => tracing::debug!(
				outcome = outcome.as_str(),
				error = %error,
				"Proceeding without a bearer credential."
			),
			None => tracing::debug!(outcome = outcome.as_str(), "Credential step finished."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (outcome, error);
	}
}
