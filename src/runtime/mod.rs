//! Runtime concerns shared by every service: the API's configuration
//! and the user-visible error type.

mod config;
pub use config::{Config, InitializeConfigError};

mod error;
pub use error::{Error, Result};
