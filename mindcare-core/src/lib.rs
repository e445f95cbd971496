//! Core types and traits for the MindCare support assistant
//!
//! This crate provides the foundational types shared by the other
//! MindCare components: errors, configuration, logging bootstrap, the
//! chat session data model with its transition rules, and the identity
//! boundary consumed by the surrounding application.

pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
