//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Json, Router};

use super::{WelcomeResponse, WelcomeService};

impl From<WelcomeService> for Router
{
	fn from(svc: WelcomeService) -> Self
	{
		Router::new().route("/", routing::get(get_welcome)).with_state(svc)
	}
}

/// The welcome message.
#[tracing::instrument(skip(svc))]
#[utoipa::path(
  get,
  path = "/",
  tag = "Welcome",
  responses(
    (status = 200, description = "The welcome message.", body = WelcomeResponse),
  ),
)]
pub(crate) async fn get_welcome(State(svc): State<WelcomeService>) -> Json<WelcomeResponse>
{
	Json(svc.welcome().await)
}
