//! Chat controller for the MindCare support assistant
//!
//! Owns one chat session and sequences the submit -> respond -> append
//! cycle against a [`Responder`], one request in flight at a time.
//!
//! [`Responder`]: mindcare_responder::Responder

pub mod controller;

pub use controller::{ChatController, SendOutcome, WELCOME_MESSAGE};
