//! Configuration validation
//!
//! Checks an evaluation config for values that would only fail later, once
//! predictions have been read.

mod error;
mod validator;


pub use error::ValidationError;
pub use validator::validate_config;
