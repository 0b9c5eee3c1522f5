//! The `x-api-key` request header.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{request, HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};
use axum_extra::TypedHeader;

use super::ApiKeySecret;
use crate::runtime::{Error, Result};

/// The header carrying the caller's API key.
static X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// Proof that a request presented the configured API key.
///
/// Extract this before any body extractor so the key is checked before the
/// payload is even deserialized, and long before any database access.
#[derive(Debug)]
pub struct ApiKey;

#[async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
	S: Send + Sync,
	ApiKeySecret: FromRef<S>,
{
	type Rejection = Error;

	#[tracing::instrument(
		level = "debug",
		name = "auth::api_key::from_request_parts",
		skip_all,
		err(level = "debug"),
	)]
	async fn from_request_parts(parts: &mut request::Parts, state: &S) -> Result<Self>
	{
		let TypedHeader(XApiKey(presented)) =
			TypedHeader::<XApiKey>::from_request_parts(parts, state)
				.await
				.map_err(|_| Error::unauthorized())?;

		let secret = ApiKeySecret::from_ref(state);

		if !secret.matches(&presented) {
			return Err(Error::unauthorized());
		}

		tracing::debug!("authenticated API key");

		Ok(ApiKey)
	}
}

/// Typed representation of the `x-api-key` header.
#[allow(clippy::missing_docs_in_private_items)]
struct XApiKey(String);

impl Header for XApiKey
{
	fn name() -> &'static HeaderName
	{
		&X_API_KEY
	}

	fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
	where
		I: Iterator<Item = &'i HeaderValue>,
	{
		values
			.next()
			.and_then(|value| value.to_str().ok())
			.map(|value| Self(value.to_owned()))
			.ok_or_else(headers::Error::invalid)
	}

	fn encode<E>(&self, values: &mut E)
	where
		E: Extend<HeaderValue>,
	{
		if let Ok(value) = HeaderValue::from_str(&self.0) {
			values.extend([value]);
		}
	}
}
