//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set, and otherwise defaults
/// to debug-level output for the API itself and its HTTP layer.
pub fn init()
{
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("footfall_api=debug,tower_http=debug"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
