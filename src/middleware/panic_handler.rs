//! A middleware for catching panics.
//!
//! Normally, if an HTTP handler panics, the connection will simply be closed.
//! This middleware will catch panics and return a proper HTTP response.

use std::any::Any;

use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::runtime;

/// Creates a middleware layer for catching panics and turning them into
/// responses.
pub fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

/// A custom panic handler for [`CatchPanicLayer`].
#[derive(Debug, Clone)]
pub struct PanicHandler;

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = axum::body::Body;

	fn response_for_panic(
		&mut self,
		panic_payload: Box<dyn Any + Send + 'static>,
	) -> axum::http::Response<Self::ResponseBody>
	{
		let message = panic_payload
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| panic_payload.downcast_ref::<String>().map(String::as_str));

		tracing::error!(?message, "HTTP handler panicked");

		runtime::Error::panic().into_response()
	}
}
