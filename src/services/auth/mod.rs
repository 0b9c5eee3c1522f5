//! API key authentication.
//!
//! The API has exactly one shared secret. Requests to protected routes carry
//! it in the `x-api-key` header, and the [`ApiKey`] extractor compares it
//! against the configured value before the request body is touched.

use std::fmt;

mod api_key;
pub use api_key::ApiKey;

/// The configured API key secret.
///
/// A missing `API_KEY` environment variable is represented as [`None`], in
/// which case no presented key ever matches.
#[derive(Clone)]
pub struct ApiKeySecret(Option<String>);

impl ApiKeySecret
{
	/// Create a new [`ApiKeySecret`].
	pub fn new(secret: Option<String>) -> Self
	{
		Self(secret)
	}

	/// Check whether `presented` matches the configured secret.
	pub fn matches(&self, presented: &str) -> bool
	{
		self.0.as_deref().is_some_and(|secret| secret == presented)
	}
}

impl fmt::Debug for ApiKeySecret
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_tuple("ApiKeySecret")
			.field(&self.0.as_deref().map(|_| "<redacted>"))
			.finish()
	}
}
