//! Various middlewares.

pub mod panic_handler;
