//! A service for reading and submitting footfall records.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::auth::ApiKeySecret;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::{FootfallRecord, InvalidPlaceName, PlaceName};

mod store;
pub use store::{DataStore, MySqlStore, StoreConnection};

pub(crate) mod http;

#[cfg(test)]
mod tests;

/// The maximum number of records returned by a single fetch.
pub const MAX_RESULTS: u64 = 10;

/// A service for reading and submitting footfall records.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct FootfallService
{
	store: Arc<dyn DataStore>,
	api_key: ApiKeySecret,
}

impl FootfallService
{
	/// Create a new [`FootfallService`].
	pub fn new(store: Arc<dyn DataStore>, api_key: ApiKeySecret) -> Self
	{
		Self { store, api_key }
	}

	/// Fetch up to [`MAX_RESULTS`] footfall records, in whatever order the
	/// store returns them.
	#[tracing::instrument(skip(self), err(level = "debug"))]
	pub async fn fetch_footfall(&self) -> Result<Vec<FootfallRecord>>
	{
		let mut conn = self.store.acquire().await.map_err(Error::ConnectionFailed)?;
		let records = conn.fetch_footfall(MAX_RESULTS).await;

		conn.close().await;

		records.map_err(Error::QueryFailed)
	}

	/// Insert a new footfall record and echo it back.
	#[tracing::instrument(skip(self), err(level = "debug"))]
	pub async fn submit_footfall(&self, record: FootfallRecord) -> Result<FootfallRecord>
	{
		let mut conn = self.store.acquire().await.map_err(Error::ConnectionFailed)?;
		let inserted = conn.insert_footfall(&record).await;

		conn.close().await;

		inserted.map_err(Error::QueryFailed)?;

		Ok(record)
	}
}
