//! Response generation for the MindCare support assistant
//!
//! This crate provides the `Responder` seam the chat controller talks
//! to, together with the scripted keyword classifier that stands in for
//! a real inference backend, and the wellbeing helpers shared with the
//! surrounding application.

pub mod base;
pub mod scripted;
pub mod wellbeing;

pub use base::{Reply, Responder, ResponderError, ResponderResult};
pub use scripted::{Category, Classification, DelayPolicy, ScriptedResponder};
pub use wellbeing::{session_stress, EmotionObservation, StressLevel};
