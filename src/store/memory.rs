//! Thread-safe in-memory stores for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{Cookie, CookieStore, KeyValueStore, StoreError, StoreFuture},
};

type EntryMap = Arc<RwLock<HashMap<String, String>>>;

/// In-process cookie jar keyed by cookie name.
///
/// Clones share the same jar, so a handle kept by the application can rotate cookies that a
/// provider reads on its next fetch.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieStore(EntryMap);
impl MemoryCookieStore {
	/// Sets or replaces a cookie.
	pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
		self.0.write().insert(name.into(), value.into());
	}

	/// Deletes a cookie.
	pub fn remove(&self, name: &str) {
		self.0.write().remove(name);
	}
}
impl CookieStore for MemoryCookieStore {
	fn get<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<Cookie>> {
		let value = self.0.read().get(name).cloned();

		Box::pin(async move { Ok(value.map(|value| Cookie::new(name, value))) })
	}
}

/// In-process key/value store mirroring browser local storage semantics.
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyValueStore(EntryMap);
impl KeyValueStore for MemoryKeyValueStore {
	fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.0.write().insert(key.to_owned(), value.to_owned());

		Ok(())
	}

	fn remove_item(&self, key: &str) -> Result<(), StoreError> {
		self.0.write().remove(key);

		Ok(())
	}
}
