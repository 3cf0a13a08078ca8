//! Token provider backed by a synchronous key/value store.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	provider::{ProviderFuture, TokenProvider},
	store::KeyValueStore,
};

/// Reads the bearer token stored under a key.
///
/// The store is synchronous but [`fetch`](TokenProvider::fetch) keeps the asynchronous contract,
/// so the read happens when the returned future is first polled.
pub struct LocalStorageTokenProvider<S>
where
	S: ?Sized + KeyValueStore,
{
	store: Arc<S>,
}
impl<S> LocalStorageTokenProvider<S>
where
	S: ?Sized + KeyValueStore,
{
	/// Creates a provider reading from `store`.
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}
}
impl<S> TokenProvider for LocalStorageTokenProvider<S>
where
	S: ?Sized + KeyValueStore,
{
	fn fetch<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Option<Credential>> {
		Box::pin(async move {
			let Some(token) = self.store.get_item(key)? else {
				return Ok(None);
			};

			Ok(Some(Credential::decode(token)?))
		})
	}
}
impl<S> Clone for LocalStorageTokenProvider<S>
where
	S: ?Sized + KeyValueStore,
{
	fn clone(&self) -> Self {
		Self { store: Arc::clone(&self.store) }
	}
}
impl<S> Debug for LocalStorageTokenProvider<S>
where
	S: ?Sized + KeyValueStore,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("LocalStorageTokenProvider(..)")
	}
}
