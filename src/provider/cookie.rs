//! Token provider backed by a cookie store.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	provider::{ProviderFuture, TokenProvider},
	store::CookieStore,
};

/// Reads the bearer token from a named cookie.
pub struct CookieTokenProvider<S>
where
	S: ?Sized + CookieStore,
{
	store: Arc<S>,
}
impl<S> CookieTokenProvider<S>
where
	S: ?Sized + CookieStore,
{
	/// Creates a provider reading from `store`.
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}
}
impl<S> TokenProvider for CookieTokenProvider<S>
where
	S: ?Sized + CookieStore,
{
	fn fetch<'a>(&'a self, cookie_name: &'a str) -> ProviderFuture<'a, Option<Credential>> {
		Box::pin(async move {
			let Some(cookie) = self.store.get(cookie_name).await? else {
				return Ok(None);
			};

			Ok(Some(Credential::decode(cookie.value)?))
		})
	}
}
impl<S> Clone for CookieTokenProvider<S>
where
	S: ?Sized + CookieStore,
{
	fn clone(&self) -> Self {
		Self { store: Arc::clone(&self.store) }
	}
}
impl<S> Debug for CookieTokenProvider<S>
where
	S: ?Sized + CookieStore,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CookieTokenProvider(..)")
	}
}
