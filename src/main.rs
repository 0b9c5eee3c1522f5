//! Footfall Data API - HTTP access to geographic footfall records.
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program. If not, see https://www.gnu.org/licenses.

use color_eyre::eyre::WrapErr;
use footfall_api::runtime;

#[tokio::main]
async fn main() -> color_eyre::Result<()>
{
	color_eyre::install()?;

	if dotenvy::dotenv().is_err() {
		// A missing `.env` file is not necessarily an issue (e.g. when running
		// in CI), but we log it to stderr just in case.
		eprintln!("WARNING: no `.env` file found");
	}

	footfall_api::telemetry::init();

	let config = runtime::Config::new().context("load config")?;
	let listener = tokio::net::TcpListener::bind(config.listen_addr())
		.await
		.context("bind TCP listener")?;

	tracing::info!(addr = %config.listen_addr(), "serving API");

	axum::serve(listener, footfall_api::server(config))
		.await
		.context("run API")?;

	Ok(())
}
