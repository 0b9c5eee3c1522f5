//! The errors that can occur when interacting with this service.

use thiserror::Error;

use crate::runtime;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the footfall service.
#[derive(Debug, Error)]
pub enum Error
{
	/// No database connection could be established.
	#[error("database connection failed")]
	ConnectionFailed(#[source] sqlx::Error),

	/// A statement failed to execute against the database.
	#[error("database error: {0}")]
	QueryFailed(sqlx::Error),
}

impl From<Error> for runtime::Error
{
	#[track_caller]
	fn from(value: Error) -> Self
	{
		match value {
			Error::ConnectionFailed(error) => Self::database_unavailable(error),
			Error::QueryFailed(error) => Self::database(error),
		}
	}
}
