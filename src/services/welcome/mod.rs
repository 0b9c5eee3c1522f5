//! The root of the API.
//!
//! This doesn't really need to be a service, but it keeps the landing route
//! wired up the same way as every other route.

use axum::extract::FromRef;
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod http;

/// The fixed message returned by the root route.
pub const WELCOME_MESSAGE: &str =
	"Welcome to the Footfall Data API. Use /footfall/ to get or post data.";

/// A service that greets callers and points them at the data routes.
#[derive(Debug, Clone, Copy, FromRef)]
pub struct WelcomeService {}

impl WelcomeService
{
	/// Create a new [`WelcomeService`].
	pub fn new() -> Self
	{
		Self {}
	}

	/// Produce the welcome message.
	#[tracing::instrument(level = "trace", skip(self))]
	pub async fn welcome(&self) -> WelcomeResponse
	{
		WelcomeResponse { message: WELCOME_MESSAGE }
	}
}

/// Response payload for the root route.
#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse
{
	/// A human readable greeting.
	#[schema(
	  value_type = String,
	  example = "Welcome to the Footfall Data API. Use /footfall/ to get or post data.",
	)]
	message: &'static str,
}
