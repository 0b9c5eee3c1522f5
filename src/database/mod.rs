//! Database connectivity.
//!
//! The API deliberately does not hold a connection pool: every request
//! opens a fresh connection and closes it before responding. The
//! [`ConnectionFactory`] owns the configured parameters and performs the
//! actual connect.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use crate::runtime::Config;

/// Opens one database connection per call from the configured parameters.
///
/// There is no pooling and no retry; callers own the returned connection
/// and are responsible for closing it on every exit path.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionFactory
{
	/// Host of the database server.
	server: Option<String>,

	/// Name of the database to use.
	database: Option<String>,

	/// User to connect as.
	user: Option<String>,

	/// Password for `user`.
	password: Option<String>,

	/// Port the database server listens on, unparsed.
	port: Option<String>,

	/// Driver to connect with; only `mysql` is supported.
	driver: Option<String>,
}

impl ConnectionFactory
{
	/// Create a new [`ConnectionFactory`] from the configured database
	/// parameters.
	pub fn new(config: &Config) -> Self
	{
		Self {
			server: config.db_server().map(ToOwned::to_owned),
			database: config.db_database().map(ToOwned::to_owned),
			user: config.db_user().map(ToOwned::to_owned),
			password: config.db_password().map(ToOwned::to_owned),
			port: config.db_port().map(ToOwned::to_owned),
			driver: config.db_driver().map(ToOwned::to_owned),
		}
	}

	/// Open a fresh database connection.
	///
	/// Parameters are validated here rather than at startup, so a missing
	/// value surfaces as a configuration error on the first connection
	/// attempt.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn connect(&self) -> Result<MySqlConnection, sqlx::Error>
	{
		let options = self.connect_options()?;

		MySqlConnection::connect_with(&options).await
	}

	/// Build connection options from the raw parameters.
	fn connect_options(&self) -> Result<MySqlConnectOptions, sqlx::Error>
	{
		let driver = self
			.driver
			.as_deref()
			.ok_or_else(|| configuration("`DB_DRIVER` is not set"))?;

		if !driver.eq_ignore_ascii_case("mysql") {
			return Err(configuration(format!("unsupported database driver `{driver}`")));
		}

		let server = self
			.server
			.as_deref()
			.ok_or_else(|| configuration("`DB_SERVER` is not set"))?;

		let database = self
			.database
			.as_deref()
			.ok_or_else(|| configuration("`DB_DATABASE` is not set"))?;

		let user = self
			.user
			.as_deref()
			.ok_or_else(|| configuration("`DB_USER` is not set"))?;

		let password = self
			.password
			.as_deref()
			.ok_or_else(|| configuration("`DB_PASSWORD` is not set"))?;

		let port = self
			.port
			.as_deref()
			.ok_or_else(|| configuration("`DB_PORT` is not set"))?
			.parse::<u16>()
			.map_err(|error| configuration(format!("invalid `DB_PORT`: {error}")))?;

		Ok(MySqlConnectOptions::new()
			.host(server)
			.port(port)
			.database(database)
			.username(user)
			.password(password))
	}
}

/// Shorthand for constructing a [`sqlx::Error::Configuration`].
fn configuration(
	message: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> sqlx::Error
{
	sqlx::Error::Configuration(message.into())
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn factory() -> ConnectionFactory
	{
		ConnectionFactory {
			server: Some(String::from("localhost")),
			database: Some(String::from("footfall")),
			user: Some(String::from("api")),
			password: Some(String::from("hunter2")),
			port: Some(String::from("3306")),
			driver: Some(String::from("mysql")),
		}
	}

	#[test]
	fn complete_parameters_produce_options()
	{
		assert!(factory().connect_options().is_ok());
	}

	#[test]
	fn missing_driver_is_a_configuration_error()
	{
		let mut factory = factory();
		factory.driver = None;

		assert!(matches!(factory.connect_options(), Err(sqlx::Error::Configuration(_))));
	}

	#[test]
	fn unsupported_driver_is_a_configuration_error()
	{
		let mut factory = factory();
		factory.driver = Some(String::from("ODBC Driver 17 for SQL Server"));

		assert!(matches!(factory.connect_options(), Err(sqlx::Error::Configuration(_))));
	}

	#[test]
	fn missing_server_is_a_configuration_error()
	{
		let mut factory = factory();
		factory.server = None;

		assert!(matches!(factory.connect_options(), Err(sqlx::Error::Configuration(_))));
	}

	#[test]
	fn invalid_port_is_a_configuration_error()
	{
		let mut factory = factory();
		factory.port = Some(String::from("not-a-port"));

		assert!(matches!(factory.connect_options(), Err(sqlx::Error::Configuration(_))));
	}
}
