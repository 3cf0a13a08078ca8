//! Redacted wrapper for raw bearer tokens.

// crates.io
use http::header::InvalidHeaderValue;
// self
use crate::_prelude::*;

/// Raw token string that never prints itself.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a raw token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Renders the `Authorization` header value `Bearer <token>`, flagged as sensitive so HTTP
	/// stacks skip it when dumping headers.
	pub fn bearer_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.0))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("header.payload.signature");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn bearer_header_value_is_sensitive() {
		let value = TokenSecret::new("abc.def.ghi")
			.bearer_header_value()
			.expect("Plain ASCII tokens must form a header value.");

		assert_eq!(value, "Bearer abc.def.ghi");
		assert!(value.is_sensitive());
		assert!(TokenSecret::new("line\nbreak").bearer_header_value().is_err());
	}
}
