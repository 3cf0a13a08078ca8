//! Payload decoding for compact-serialized JWS tokens.
//!
//! [`decode`] reads the claim set out of the payload segment without touching the signature.
//! Nothing here validates a token; it only tells a well-formed token apart from garbage.

// crates.io
use base64::{
	Engine,
	alphabet::URL_SAFE,
	engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
// self
use crate::_prelude::*;

/// Decoded claim set carried in a token payload.
pub type Claims = serde_json::Map<String, Value>;

// Some issuers keep the `=` padding on segments; accept both forms.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
	&URL_SAFE,
	GeneralPurposeConfig::new()
		.with_encode_padding(false)
		.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reasons a token payload could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DecodeError {
	/// The token string was empty.
	#[error("Token is empty.")]
	Empty,
	/// Five segments indicate a JWE, whose payload is encrypted.
	#[error("Encrypted tokens cannot be decoded; only compact JWS tokens are supported.")]
	Encrypted,
	/// Compact JWS tokens carry exactly three segments.
	#[error("Token must contain three segments but has {segments}.")]
	Segments {
		/// Number of `.`-separated segments found.
		segments: usize,
	},
	/// The payload segment was empty.
	#[error("Token payload segment is empty.")]
	MissingPayload,
	/// The payload segment is not valid base64url.
	#[error("Token payload is not valid base64url: {message}.")]
	Base64 {
		/// Decoder message.
		message: String,
	},
	/// The decoded payload is not valid JSON.
	#[error("Token payload is not valid JSON: {message}.")]
	Json {
		/// Parser message.
		message: String,
	},
	/// The decoded payload is JSON but not an object.
	#[error("Token payload must be a JSON object.")]
	NotAnObject,
}

/// Decodes the claim set of a compact-serialized JWS without verifying it.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
	if token.is_empty() {
		return Err(DecodeError::Empty);
	}

	let segments = token.split('.').collect::<Vec<_>>();
	let payload = match segments.as_slice() {
		[_, payload, _] => *payload,
		_ if segments.len() == 5 => return Err(DecodeError::Encrypted),
		_ => return Err(DecodeError::Segments { segments: segments.len() }),
	};

	if payload.is_empty() {
		return Err(DecodeError::MissingPayload);
	}

	let bytes = URL_SAFE_LENIENT
		.decode(payload)
		.map_err(|e| DecodeError::Base64 { message: e.to_string() })?;

	match serde_json::from_slice::<Value>(&bytes) {
		Ok(Value::Object(claims)) => Ok(claims),
		Ok(_) => Err(DecodeError::NotAnObject),
		Err(e) => Err(DecodeError::Json { message: e.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::engine::general_purpose::URL_SAFE_NO_PAD;
	use serde_json::json;
	// self
	use super::*;
	use crate::_preludet::fake_jwt;

	#[test]
	fn decodes_payload_claims() {
		let token = fake_jwt(&json!({ "sub": "u1", "roles": ["admin"] }));
		let claims = decode(&token).expect("Well-formed token should decode.");

		assert_eq!(claims.get("sub"), Some(&json!("u1")));
		assert_eq!(claims.get("roles"), Some(&json!(["admin"])));
	}

	#[test]
	fn accepts_padded_payload_segments() {
		let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"u"}"#);

		assert!(payload.ends_with('='), "Fixture must exercise padding.");

		let claims = decode(&format!("e30.{payload}.sig")).expect("Padded payload should decode.");

		assert_eq!(claims.get("sub"), Some(&json!("u")));
	}

	#[test]
	fn rejects_malformed_tokens() {
		assert_eq!(decode(""), Err(DecodeError::Empty));
		assert_eq!(decode("not-a-jwt"), Err(DecodeError::Segments { segments: 1 }));
		assert_eq!(decode("a.b.c.d.e"), Err(DecodeError::Encrypted));
		assert_eq!(decode("a..c"), Err(DecodeError::MissingPayload));
		assert!(matches!(decode("a.!!!.c"), Err(DecodeError::Base64 { .. })));

		let not_json = URL_SAFE_NO_PAD.encode("plain text");

		assert!(matches!(decode(&format!("a.{not_json}.c")), Err(DecodeError::Json { .. })));

		let array = URL_SAFE_NO_PAD.encode("[1,2]");

		assert_eq!(decode(&format!("a.{array}.c")), Err(DecodeError::NotAnObject));
	}
}
