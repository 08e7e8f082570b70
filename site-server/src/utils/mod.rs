//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - unified API error and response types
//! - [`logger`] - tracing setup
//! - validation and time helpers

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult};
pub use error::ok;
