//! API services.
//!
//! These contain the core business logic.
//!
//! If a service directly maps to an HTTP route, it will have an `http` module
//! and will implement `Into<axum::Router>`.

pub mod welcome;
pub use welcome::WelcomeService;

pub mod auth;

pub mod footfall;
pub use footfall::FootfallService;
