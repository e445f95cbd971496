//! Configuration management
//!
//! Handles loading and validation of MindCare configuration from the
//! config file and environment variables.

pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::ConfigLoader;
pub use schema::*;
