//! Token providers: pluggable sources of the current bearer credential.
//!
//! A [`TokenProvider`] is handed an identifier (cookie name, storage key, ...) and re-reads its
//! backing store on every call. Absence is `Ok(None)`; a present-but-corrupt token or a failing
//! store is an `Err`, leaving it to the caller to decide whether that matters.
//! [`GqlClient`](crate::client::GqlClient) flattens every error into "no credential".

pub mod cookie;
pub mod func;
pub mod local_storage;

pub use cookie::CookieTokenProvider;
pub use func::{FnTokenProvider, provider_fn};
pub use local_storage::LocalStorageTokenProvider;

// self
use crate::{
	_prelude::*,
	auth::{Credential, DecodeError},
	store::StoreError,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by [`TokenProvider::fetch`].
pub type ProviderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, CredentialError>> + 'a + Send>>;

/// Asynchronous source of the current [`Credential`].
pub trait TokenProvider
where
	Self: Send + Sync,
{
	/// Reads the credential stored under `identifier`, or `None` when nothing is stored.
	fn fetch<'a>(&'a self, identifier: &'a str) -> ProviderFuture<'a, Option<Credential>>;
}

/// Failures raised while acquiring a credential.
#[derive(Debug, ThisError)]
pub enum CredentialError {
	/// A token was present but its payload could not be decoded.
	#[error("Stored token is malformed.")]
	Decode(#[from] DecodeError),
	/// The backing store could not be read.
	#[error("Credential store could not be read.")]
	Store(#[from] StoreError),
	/// Custom provider failure.
	#[error("Token provider failed.")]
	Provider {
		/// Provider-specific failure.
		#[source]
		source: BoxError,
	},
}
impl CredentialError {
	/// Wraps a provider-specific failure.
	pub fn provider(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Provider { source: Box::new(src) }
	}
}
