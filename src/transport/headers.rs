//! Caller-supplied header normalization.

// self
use crate::{_prelude::*, error::ConfigError};

/// Extra headers accepted by [`GqlClient::execute`](crate::client::GqlClient::execute).
///
/// Three shapes are accepted: a ready [`HeaderMap`], a list of name/value pairs, or a string
/// map. All of them normalize into one [`HeaderMap`]; pairs and maps keep the last value seen
/// for a name, so equivalent content yields the same headers whatever the shape.
#[derive(Clone, Debug, Default)]
pub enum RequestHeaders {
	/// No extra headers.
	#[default]
	Empty,
	/// Already-built header collection, used as is.
	Map(HeaderMap),
	/// Ordered name/value pairs.
	Pairs(Vec<(String, String)>),
	/// Plain string mapping.
	Record(BTreeMap<String, String>),
}
impl RequestHeaders {
	/// Converts the headers into a [`HeaderMap`], validating names and values.
	pub fn normalize(self) -> Result<HeaderMap, ConfigError> {
		match self {
			Self::Empty => Ok(HeaderMap::new()),
			Self::Map(map) => Ok(map),
			Self::Pairs(pairs) => collect(pairs),
			Self::Record(record) => collect(record),
		}
	}
}
impl From<HeaderMap> for RequestHeaders {
	fn from(map: HeaderMap) -> Self {
		Self::Map(map)
	}
}
impl<K, V> From<Vec<(K, V)>> for RequestHeaders
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: Vec<(K, V)>) -> Self {
		Self::Pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl<K, V, const N: usize> From<[(K, V); N]> for RequestHeaders
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		Self::Pairs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl<K, V> From<BTreeMap<K, V>> for RequestHeaders
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(record: BTreeMap<K, V>) -> Self {
		Self::Record(record.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl<K, V> From<HashMap<K, V>> for RequestHeaders
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(record: HashMap<K, V>) -> Self {
		Self::Record(record.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
impl<H> From<Option<H>> for RequestHeaders
where
	H: Into<RequestHeaders>,
{
	fn from(headers: Option<H>) -> Self {
		headers.map(Into::into).unwrap_or_default()
	}
}

fn collect<I>(entries: I) -> Result<HeaderMap, ConfigError>
where
	I: IntoIterator<Item = (String, String)>,
{
	let mut map = HeaderMap::new();

	for (name, value) in entries {
		let header_value = HeaderValue::try_from(value.as_str())
			.map_err(|source| ConfigError::InvalidHeaderValue { name: name.clone(), source })?;
		let header_name = HeaderName::try_from(name.as_str())
			.map_err(|source| ConfigError::InvalidHeaderName { name, source })?;

		map.insert(header_name, header_value);
	}

	Ok(map)
}
