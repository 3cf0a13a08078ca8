//! Backing-store capabilities read by token providers, plus built-in implementations.
//!
//! Providers only ever read from these stores; writers (`set`, `set_item`, ...) exist so
//! applications and tests can seed them.

pub mod file;
#[cfg(feature = "reqwest")] pub mod jar;
pub mod memory;

pub use file::FileKeyValueStore;
#[cfg(feature = "reqwest")] pub use jar::JarCookieStore;
pub use memory::{MemoryCookieStore, MemoryKeyValueStore};

// self
use crate::_prelude::*;

/// Boxed future returned by asynchronous store reads.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Asynchronous cookie lookup, scoped to whatever origin the implementation was built for.
pub trait CookieStore
where
	Self: Send + Sync,
{
	/// Returns the named cookie, or `None` when it is not set.
	fn get<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<Cookie>>;
}

/// Synchronous persistent key/value storage.
pub trait KeyValueStore
where
	Self: Send + Sync,
{
	/// Returns the stored value, or `None` when the key is absent.
	fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Stores or replaces a value.
	fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Deletes a value; removing an absent key is not an error.
	fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// A cookie as seen by a [`CookieStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
	/// Cookie name.
	pub name: String,
	/// Cookie value.
	pub value: String,
}
impl Cookie {
	/// Creates a new cookie.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}
}

/// Error type produced by [`CookieStore`] and [`KeyValueStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_messages_are_sentences() {
		let error = StoreError::Backend { message: "cookie store unreachable".into() };

		assert_eq!(error.to_string(), "Backend failure: cookie store unreachable.");
	}

	#[test]
	fn cookie_can_be_serialized() {
		let payload = serde_json::to_string(&Cookie::new("session", "abc"))
			.expect("Cookie should serialize to JSON.");

		assert_eq!(payload, r#"{"name":"session","value":"abc"}"#);
	}
}
