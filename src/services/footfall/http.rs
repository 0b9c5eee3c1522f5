//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Json, Router};

use super::{FootfallRecord, FootfallService};
use crate::runtime::Result;
use crate::services::auth::ApiKey;

impl From<FootfallService> for Router
{
	fn from(svc: FootfallService) -> Self
	{
		Router::new()
			.route("/", routing::get(get_footfall))
			.route("/", routing::post(submit_footfall))
			.with_state(svc)
	}
}

/// Fetch footfall records.
///
/// Returns at most 10 records, in whatever order the store yields them.
#[tracing::instrument(skip(svc))]
#[utoipa::path(
  get,
  path = "/footfall/",
  tag = "Footfall",
  responses(
    (status = 200, description = "Up to 10 footfall records.", body = Vec<FootfallRecord>),
    (status = 500, description = "The database could not be reached, or the query failed."),
  ),
)]
pub(crate) async fn get_footfall(
	State(svc): State<FootfallService>,
) -> Result<Json<Vec<FootfallRecord>>>
{
	let records = svc.fetch_footfall().await?;

	Ok(Json(records))
}

/// Submit a new footfall record.
///
/// Requires the configured API key in the `x-api-key` header. The inserted
/// record is echoed back unchanged.
#[tracing::instrument(skip(svc))]
#[utoipa::path(
  post,
  path = "/footfall/",
  tag = "Footfall",
  security(("api_key" = [])),
  request_body = FootfallRecord,
  responses(
    (status = 200, description = "The inserted record, echoed back.", body = FootfallRecord),
    (status = 401, description = "Missing or invalid API key."),
    (status = 422, description = "Malformed payload."),
    (status = 500, description = "The database could not be reached, or the insert failed."),
  ),
)]
pub(crate) async fn submit_footfall(
	_api_key: ApiKey,
	State(svc): State<FootfallService>,
	Json(record): Json<FootfallRecord>,
) -> Result<Json<FootfallRecord>>
{
	let record = svc.submit_footfall(record).await?;

	Ok(Json(record))
}
