//! Compatibility scoring, ranking, and adoption session tracking for animal shelters.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
