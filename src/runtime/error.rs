//! The main error type.
//!
//! This is returned by all fallible HTTP handlers, middlewares, etc.

use std::fmt;
use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Type alias that defaults to our [`Error`] as the default error type, but is
/// still overridable and therefore compatible with [`std::result::Result`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main runtime error type.
///
/// This is the only error type allowed to reach users!
pub struct Error
{
	/// We box this so our error type is only 1 pointer wide.
	inner: Box<Inner>,
}

/// The different kinds of errors that can occur at runtime.
#[derive(Debug, thiserror::Error)]
enum ErrorKind
{
	/// Request did not carry the configured API key.
	#[error("invalid API key")]
	Unauthorized,

	/// No database connection could be established.
	#[error("database connection failed")]
	DatabaseUnavailable(#[source] sqlx::Error),

	/// A database statement failed to execute.
	#[error("database error: {0}")]
	Database(sqlx::Error),

	/// An HTTP handler panicked, but was caught by middleware.
	#[error("something unexpected happened; please report this incident")]
	Panic,
}

impl Error
{
	/// Create a new [`Error`].
	#[track_caller]
	fn new(kind: ErrorKind) -> Self
	{
		Self { inner: Box::new(Inner::new(kind)) }
	}

	/// Returns the original error source.
	pub fn source(&self) -> &(dyn std::error::Error + Send + Sync + 'static)
	{
		&self.inner.kind
	}

	/// Returns the source code location of the original error source.
	pub fn source_location(&self) -> Location<'static>
	{
		self.inner.source_location
	}

	/// Returns the appropriate HTTP status code to use in an error response.
	fn status(&self) -> StatusCode
	{
		match self.inner.kind {
			ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
			ErrorKind::DatabaseUnavailable(_) | ErrorKind::Database(_) | ErrorKind::Panic => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Reject a request because it did not present the configured API key.
	#[track_caller]
	pub(crate) fn unauthorized() -> Self
	{
		Self::new(ErrorKind::Unauthorized)
	}

	/// Report that no database connection could be established.
	#[track_caller]
	pub(crate) fn database_unavailable(error: sqlx::Error) -> Self
	{
		Self::new(ErrorKind::DatabaseUnavailable(error))
	}

	/// Report a database statement that failed to execute.
	#[track_caller]
	pub(crate) fn database(error: sqlx::Error) -> Self
	{
		Self::new(ErrorKind::Database(error))
	}

	/// Indicate that an HTTP handler panicked but the panic was caught.
	#[track_caller]
	pub(crate) fn panic() -> Self
	{
		Self::new(ErrorKind::Panic)
	}
}

impl fmt::Debug for Error
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "[{}]: {}", self.source_location(), self.source())
	}
}

impl fmt::Display for Error
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(self.source(), f)
	}
}

impl IntoResponse for Error
{
	fn into_response(self) -> Response
	{
		#[derive(Debug, Serialize)]
		#[allow(clippy::missing_docs_in_private_items)]
		struct ErrorResponse
		{
			message: String,
		}

		let status = self.status();

		if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error! {
				kind = ?self.inner.kind,
				source_location = %self.source_location(),
				"internal server error: \"{self}\"",
			};
		} else {
			tracing::debug! {
				%status,
				source_location = %self.source_location(),
				"runtime error: \"{self}\"",
			};
		}

		(status, Json(ErrorResponse { message: self.to_string() })).into_response()
	}
}

/// The actual representation of [`Error`].
struct Inner
{
	/// Which particular error we're dealing with.
	kind: ErrorKind,

	/// The source code location of where this [`Error`] was created.
	source_location: Location<'static>,
}

impl Inner
{
	/// Create a new [`Inner`].
	#[track_caller]
	fn new(kind: ErrorKind) -> Self
	{
		Self { kind, source_location: *Location::caller() }
	}
}
