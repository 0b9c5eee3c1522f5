//! Runtime configuration for the API.
//!
//! This module contains the [`Config`] struct - a set of configuration options
//! that will be read from the environment on startup. See the `.env.example`
//! file in the root of the repository for examples.
//!
//! Database parameters are deliberately not validated here: a missing or
//! nonsensical value only surfaces when the first connection attempt fails.

use std::net::SocketAddr;
use std::sync::Arc;
use std::{env, fmt};

use thiserror::Error;

use crate::services::auth::ApiKeySecret;

/// The address the API listens on unless `API_ADDR` says otherwise.
const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
	std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
	8000,
);

/// The API's runtime configuration.
///
/// See [module level docs] for more details.
///
/// [module level docs]: crate::runtime::config
#[derive(Clone)]
pub struct Config
{
	/// [`Inner`] actually contains all the values, we just wrap it so
	/// [`Config`] is cheap to clone.
	inner: Arc<Inner>,
}

/// Error that can occur while initializing the API's [`Config`].
#[derive(Debug, Error)]
pub enum InitializeConfigError
{
	/// An optional configuration value was set to something unparseable.
	#[error("failed to parse `{var}`: {error}")]
	Parse
	{
		/// The environment variable that failed to parse.
		var: &'static str,

		/// The underlying parse error.
		error: Box<dyn std::error::Error + Send + Sync + 'static>,
	},
}

impl Config
{
	/// Initializes a [`Config`] by reading environment variables.
	pub fn new() -> Result<Self, InitializeConfigError>
	{
		let db_server = var_opt("DB_SERVER");
		let db_database = var_opt("DB_DATABASE");
		let db_user = var_opt("DB_USER");
		let db_password = var_opt("DB_PASSWORD");
		let db_port = var_opt("DB_PORT");
		let db_driver = var_opt("DB_DRIVER");
		let api_key = ApiKeySecret::new(var_opt("API_KEY"));

		let listen_addr = match var_opt("API_ADDR") {
			None => DEFAULT_LISTEN_ADDR,
			Some(raw) => raw.parse::<SocketAddr>().map_err(|error| {
				InitializeConfigError::Parse { var: "API_ADDR", error: Box::new(error) }
			})?,
		};

		Ok(Self {
			inner: Arc::new(Inner {
				db_server,
				db_database,
				db_user,
				db_password,
				db_port,
				db_driver,
				api_key,
				listen_addr,
			}),
		})
	}

	/// Returns the database host.
	pub fn db_server(&self) -> Option<&str>
	{
		self.inner.db_server.as_deref()
	}

	/// Returns the database name.
	pub fn db_database(&self) -> Option<&str>
	{
		self.inner.db_database.as_deref()
	}

	/// Returns the database user.
	pub fn db_user(&self) -> Option<&str>
	{
		self.inner.db_user.as_deref()
	}

	/// Returns the database password.
	pub fn db_password(&self) -> Option<&str>
	{
		self.inner.db_password.as_deref()
	}

	/// Returns the database port, unparsed.
	pub fn db_port(&self) -> Option<&str>
	{
		self.inner.db_port.as_deref()
	}

	/// Returns the database driver name.
	pub fn db_driver(&self) -> Option<&str>
	{
		self.inner.db_driver.as_deref()
	}

	/// Returns the shared secret expected in the `x-api-key` header.
	pub fn api_key(&self) -> ApiKeySecret
	{
		self.inner.api_key.clone()
	}

	/// Returns the address the API should listen on.
	pub fn listen_addr(&self) -> SocketAddr
	{
		self.inner.listen_addr
	}
}

impl fmt::Debug for Config
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("Config")
			.field("db_server", &self.db_server())
			.field("db_database", &self.db_database())
			.field("db_user", &self.db_user())
			.field("db_password", &self.db_password().map(|_| "<redacted>"))
			.field("db_port", &self.db_port())
			.field("db_driver", &self.db_driver())
			.field("api_key", &self.inner.api_key)
			.field("listen_addr", &self.listen_addr())
			.finish_non_exhaustive()
	}
}

#[allow(clippy::missing_docs_in_private_items)]
struct Inner
{
	/// Host of the database server.
	db_server: Option<String>,

	/// Name of the database to use.
	db_database: Option<String>,

	/// User to connect to the database as.
	db_user: Option<String>,

	/// Password for `db_user`.
	db_password: Option<String>,

	/// Port the database server listens on.
	db_port: Option<String>,

	/// Driver to connect with; only `mysql` is supported.
	db_driver: Option<String>,

	/// Shared secret expected in the `x-api-key` header.
	api_key: ApiKeySecret,

	/// The address the API listens on.
	listen_addr: SocketAddr,
}

/// Reads an environment variable.
///
/// Returns [`None`] if the variable does not exist or is empty.
fn var_opt(var: &'static str) -> Option<String>
{
	env::var(var).ok().filter(|value| !value.is_empty())
}
