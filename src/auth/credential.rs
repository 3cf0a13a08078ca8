//! Token + decoded claims pair returned by token providers.

// self
use crate::{
	_prelude::*,
	auth::{Claims, DecodeError, TokenSecret, claims},
};

/// A bearer token together with the claims decoded from that very token.
///
/// The only way to build one is [`Credential::decode`], so the payload can never drift from the
/// token it was read out of. None of the accessors validate the token; expiry and issuance
/// readers are informational.
#[derive(Clone, Debug)]
pub struct Credential {
	token: TokenSecret,
	payload: Claims,
}
impl Credential {
	/// Decodes `token` and pairs it with its claims.
	pub fn decode(token: impl Into<String>) -> Result<Self, DecodeError> {
		let token = token.into();
		let payload = claims::decode(&token)?;

		Ok(Self { token: TokenSecret::new(token), payload })
	}

	/// Raw token to present as the bearer credential.
	pub fn token(&self) -> &TokenSecret {
		&self.token
	}

	/// Claims decoded from [`Credential::token`].
	pub fn payload(&self) -> &Claims {
		&self.payload
	}

	/// Deserializes the claim set into a caller-defined type.
	pub fn claims_as<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: DeserializeOwned,
	{
		serde_path_to_error::deserialize(Value::Object(self.payload.clone()))
	}

	/// The `sub` claim, when present and a string.
	pub fn subject(&self) -> Option<&str> {
		self.payload.get("sub").and_then(Value::as_str)
	}

	/// The `exp` claim as an instant.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.numeric_date("exp")
	}

	/// The `iat` claim as an instant.
	pub fn issued_at(&self) -> Option<OffsetDateTime> {
		self.numeric_date("iat")
	}

	/// Splits the credential into its token and claims.
	pub fn into_parts(self) -> (TokenSecret, Claims) {
		(self.token, self.payload)
	}

	fn numeric_date(&self, claim: &str) -> Option<OffsetDateTime> {
		let value = self.payload.get(claim)?;
		let seconds = value.as_i64().or_else(|| value.as_f64().map(|secs| secs.trunc() as i64))?;

		OffsetDateTime::from_unix_timestamp(seconds).ok()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;
	use crate::_preludet::fake_jwt;

	#[derive(Debug, Deserialize, PartialEq)]
	struct SessionClaims {
		sub: String,
		org: Option<String>,
	}

	#[test]
	fn decode_keeps_token_and_payload_together() {
		let token = fake_jwt(&json!({ "sub": "u1", "exp": 1_767_225_600, "iat": 1_767_222_000.5 }));
		let credential = Credential::decode(token.clone()).expect("Fixture token should decode.");

		assert_eq!(credential.token().expose(), token);
		assert_eq!(credential.payload(), &claims::decode(&token).expect("Fixture should decode."));
		assert_eq!(credential.subject(), Some("u1"));
		assert_eq!(credential.expires_at(), Some(datetime!(2026-01-01 00:00 UTC)));
		assert_eq!(credential.issued_at(), Some(datetime!(2025-12-31 23:00 UTC)));
	}

	#[test]
	fn claims_as_reports_the_failing_path() {
		let credential = Credential::decode(fake_jwt(&json!({ "sub": "u1", "org": "acme" })))
			.expect("Fixture token should decode.");
		let claims = credential.claims_as::<SessionClaims>().expect("Claims should deserialize.");

		assert_eq!(claims, SessionClaims { sub: "u1".into(), org: Some("acme".into()) });

		let broken = Credential::decode(fake_jwt(&json!({ "sub": 7 })))
			.expect("Fixture token should decode.");
		let err = broken.claims_as::<SessionClaims>().expect_err("Numeric subject must fail.");

		assert_eq!(err.path().to_string(), "sub");
	}

	#[test]
	fn empty_token_is_rejected() {
		assert_eq!(Credential::decode("").map(|_| ()), Err(DecodeError::Empty));
	}
}
