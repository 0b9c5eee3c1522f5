//! Everything related to [OpenAPI].
//!
//! This project uses the [`utoipa`] crate for generating an OpenAPI
//! specification from code. It is served the way the original deployment
//! exposed it: a machine-readable document at `/openapi.json` and an
//! interactive UI at `/docs`.
//!
//! [OpenAPI]: https://spec.openapis.org/oas/latest.html

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// The complete HTTP API specification.
#[derive(OpenApi)]
#[openapi(
  info(
    title = "Footfall Data API",
    description = "Read and submit footfall records, one (state, district) pair at a time.",
    license(name = "GPL-3.0", url = "https://www.gnu.org/licenses/gpl-3.0.txt"),
  ),
  modifiers(&SecurityAddon),
  paths(
    crate::services::welcome::http::get_welcome,
    crate::services::footfall::http::get_footfall,
    crate::services::footfall::http::submit_footfall,
  ),
  components(schemas(
    crate::services::welcome::WelcomeResponse,
    crate::services::footfall::FootfallRecord,
    crate::services::footfall::PlaceName,
  )),
)]
pub struct Spec;

/// Registers the `x-api-key` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon
{
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi)
	{
		let security_schemes = &mut openapi
			.components
			.get_or_insert_with(Default::default)
			.security_schemes;

		security_schemes.insert(
			String::from("api_key"),
			SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-api-key"))),
		);
	}
}

/// Serves the interactive documentation at `/docs` and the raw document at
/// `/openapi.json`.
pub fn swagger_ui<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	SwaggerUi::new("/docs")
		.url("/openapi.json", <Spec as OpenApi>::openapi())
		.into()
}

#[cfg(test)]
mod tests
{
	use utoipa::OpenApi;

	use super::Spec;

	#[test]
	fn spec_covers_the_http_surface()
	{
		let json = Spec::openapi().to_pretty_json().unwrap();

		for needle in ["\"/\"", "\"/footfall/\"", "x-api-key", "FootfallRecord"] {
			assert!(json.contains(needle), "spec is missing {needle}");
		}
	}
}
