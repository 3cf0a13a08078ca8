//! [`CookieStore`] view over a reqwest cookie jar.

// crates.io
use reqwest::cookie::{CookieStore as ReqwestCookieStore, Jar};
// self
use crate::{
	_prelude::*,
	store::{Cookie, CookieStore, StoreError, StoreFuture},
};

/// Reads cookies that a shared [`Jar`] would send to `url`.
///
/// Sharing the jar with the reqwest client lets `Set-Cookie` responses from the API rotate the
/// session token that the next request presents as its bearer credential.
#[derive(Clone, Debug)]
pub struct JarCookieStore {
	jar: Arc<Jar>,
	url: Url,
}
impl JarCookieStore {
	/// Creates a store scoped to the cookies applicable to `url`.
	pub fn new(jar: Arc<Jar>, url: Url) -> Self {
		Self { jar, url }
	}

	/// Shared jar backing this store.
	pub fn jar(&self) -> &Arc<Jar> {
		&self.jar
	}
}
impl CookieStore for JarCookieStore {
	fn get<'a>(&'a self, name: &'a str) -> StoreFuture<'a, Option<Cookie>> {
		let header = self.jar.cookies(&self.url);

		Box::pin(async move {
			let Some(header) = header else {
				return Ok(None);
			};
			let header = header.to_str().map_err(|e| StoreError::Backend {
				message: format!("Cookie header for {} is not visible ASCII: {e}", self.url),
			})?;

			Ok(find_cookie(header, name).map(|value| Cookie::new(name, value)))
		})
	}
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
	header
		.split(';')
		.filter_map(|pair| pair.trim().split_once('='))
		.find(|(key, _)| *key == name)
		.map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn find_cookie_matches_exact_names() {
		let header = "theme=dark; access_token=a.b.c; access_token_legacy=x";

		assert_eq!(find_cookie(header, "access_token"), Some("a.b.c"));
		assert_eq!(find_cookie(header, "theme"), Some("dark"));
		assert_eq!(find_cookie(header, "access"), None);
	}

	#[tokio::test]
	async fn reads_cookies_scoped_to_the_url() {
		let jar = Arc::new(Jar::default());
		let api = Url::parse("https://api.example.com/graphql").expect("Fixture URL should parse.");
		let other = Url::parse("https://other.example.com/").expect("Fixture URL should parse.");

		jar.add_cookie_str("access_token=a.b.c; Path=/", &api);
		jar.add_cookie_str("foreign=1; Path=/", &other);

		let store = JarCookieStore::new(jar, api);

		assert_eq!(
			store.get("access_token").await.expect("Jar lookup should succeed."),
			Some(Cookie::new("access_token", "a.b.c"))
		);
		assert_eq!(store.get("foreign").await.expect("Jar lookup should succeed."), None);
	}
}
