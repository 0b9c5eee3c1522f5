//! Storage for footfall records.
//!
//! The live implementation opens one database connection per call and closes
//! it before returning, mirroring how the rest of the API talks to its
//! database: no pool, no retries. The traits exist so the HTTP layer can be
//! exercised against an in-memory double, and so a pooled implementation
//! could be swapped in without touching handler logic.

use axum::async_trait;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;

use super::FootfallRecord;
use crate::database::ConnectionFactory;
use crate::runtime::Config;

/// A handle to the persistent store.
#[async_trait]
pub trait DataStore: Send + Sync
{
	/// Open a connection to the store.
	async fn acquire(&self) -> Result<Box<dyn StoreConnection>, sqlx::Error>;
}

/// A single live connection to the persistent store.
#[async_trait]
pub trait StoreConnection: Send
{
	/// Fetch up to `limit` records, in store-defined order.
	async fn fetch_footfall(&mut self, limit: u64) -> Result<Vec<FootfallRecord>, sqlx::Error>;

	/// Insert one record and commit.
	async fn insert_footfall(&mut self, record: &FootfallRecord) -> Result<(), sqlx::Error>;

	/// Close the connection.
	///
	/// Callers invoke this on every exit path, including after a failed
	/// query.
	async fn close(self: Box<Self>);
}

/// The live [`DataStore`] backed by MySQL.
#[derive(Debug)]
pub struct MySqlStore
{
	/// Opens one fresh connection per [`acquire`] call.
	///
	/// [`acquire`]: DataStore::acquire
	factory: ConnectionFactory,
}

impl MySqlStore
{
	/// Create a new [`MySqlStore`].
	pub fn new(config: &Config) -> Self
	{
		Self { factory: ConnectionFactory::new(config) }
	}
}

#[async_trait]
impl DataStore for MySqlStore
{
	async fn acquire(&self) -> Result<Box<dyn StoreConnection>, sqlx::Error>
	{
		let conn = self.factory.connect().await?;

		Ok(Box::new(MySqlStoreConnection { conn }))
	}
}

/// A live MySQL connection.
#[allow(clippy::missing_docs_in_private_items)]
struct MySqlStoreConnection
{
	conn: MySqlConnection,
}

#[async_trait]
impl StoreConnection for MySqlStoreConnection
{
	async fn fetch_footfall(&mut self, limit: u64) -> Result<Vec<FootfallRecord>, sqlx::Error>
	{
		sqlx::query_as::<_, FootfallRecord>(
			"SELECT state, district
			 FROM footfall_data_Api
			 LIMIT ?",
		)
		.bind(limit)
		.fetch_all(&mut self.conn)
		.await
	}

	async fn insert_footfall(&mut self, record: &FootfallRecord) -> Result<(), sqlx::Error>
	{
		let mut txn = self.conn.begin().await?;

		sqlx::query(
			"INSERT INTO footfall_data_Api (state, district)
			 VALUES (?, ?)",
		)
		.bind(record.state.clone())
		.bind(record.district.clone())
		.execute(&mut *txn)
		.await?;

		txn.commit().await
	}

	async fn close(self: Box<Self>)
	{
		let Self { conn } = *self;

		if let Err(error) = conn.close().await {
			tracing::warn!(%error, "failed to close database connection");
		}
	}
}
