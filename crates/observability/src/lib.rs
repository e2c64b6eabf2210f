//! Tracing/logging shared setup.

/// Tracing configuration (filters, output formats).
pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};
