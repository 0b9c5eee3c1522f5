//! Footfall Data API - HTTP access to geographic footfall records.

/*
 * Footfall Data API
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;

pub mod telemetry;
pub mod runtime;

pub mod services;

mod database;
mod middleware;
mod openapi;

/// The server type that wraps the API.
pub type Server =
	axum::extract::connect_info::IntoMakeServiceWithConnectInfo<axum::Router, SocketAddr>;

/// Create a server that will run the API.
///
/// Note that this does not connect to the database; connections are
/// opened per request, so configuration problems only surface once the
/// first request needs one.
pub fn server(config: runtime::Config) -> Server
{
	use self::services::footfall::MySqlStore;
	use self::services::{FootfallService, WelcomeService};

	let store = Arc::new(MySqlStore::new(&config));

	let welcome_svc = WelcomeService::new();
	let footfall_svc = FootfallService::new(store, config.api_key());

	axum::Router::new()
		.merge(welcome_svc)
		.nest("/footfall", footfall_svc.into())
		.merge(openapi::swagger_ui())
		.layer(TraceLayer::new_for_http())
		.layer(middleware::panic_handler::layer())
		.into_make_service_with_connect_info::<SocketAddr>()
}
