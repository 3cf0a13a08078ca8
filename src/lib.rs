//! Bearer-token aware GraphQL client.
//!
//! A [`client::GqlClient`] wraps any [`transport::QueryTransport`] and, before each query, asks a
//! pluggable [`provider::TokenProvider`] (cookie jar, local key/value storage, or a closure) for
//! the current credential. Authentication is best effort: credential failures never fail a
//! query, while transport failures always reach the caller unchanged.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod obs;
pub mod provider;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod _preludet {
	//! Shared fixtures for unit tests.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

	/// Builds an unsigned compact JWS whose payload segment encodes `claims`.
	pub fn fake_jwt(claims: &Value) -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

		format!("{header}.{payload}.c2lnbmF0dXJl")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use http::{HeaderMap, HeaderName, HeaderValue};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::Result;
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
