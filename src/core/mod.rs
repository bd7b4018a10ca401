//! Core types for the conformance pipeline: builder, context, and error handling.

pub mod builder;
pub mod context;
pub mod error;

pub use builder::{ConformanceRunner, ConformanceRunnerBuilder};
pub use context::Context;
pub use error::{Error, Result};
