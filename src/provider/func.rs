//! Closure-backed token providers.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	provider::{CredentialError, ProviderFuture, TokenProvider},
};

/// [`TokenProvider`] that delegates to an async closure receiving the identifier.
#[derive(Clone)]
pub struct FnTokenProvider<F>(F);
impl<F, Fut> TokenProvider for FnTokenProvider<F>
where
	F: Send + Sync + Fn(String) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<Credential>, CredentialError>>,
{
	fn fetch<'a>(&'a self, identifier: &'a str) -> ProviderFuture<'a, Option<Credential>> {
		Box::pin((self.0)(identifier.to_owned()))
	}
}
impl<F> Debug for FnTokenProvider<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnTokenProvider(..)")
	}
}

/// Wraps an async closure as a [`TokenProvider`].
pub fn provider_fn<F, Fut>(f: F) -> FnTokenProvider<F>
where
	F: Send + Sync + Fn(String) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<Credential>, CredentialError>>,
{
	FnTokenProvider(f)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn closure_receives_the_identifier() {
		let provider = provider_fn(|identifier: String| async move {
			assert_eq!(identifier, "session");

			Ok::<Option<Credential>, CredentialError>(None)
		});

		assert!(provider.fetch("session").await.expect("Closure returns Ok.").is_none());
	}
}
