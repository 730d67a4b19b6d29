#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Typed pipeline configuration.
pub mod config;

/// Error types for pipeline execution.
pub mod error;

/// Sequential pipeline stage execution.
pub mod stages;

pub use config::PipelineConfig;
pub use error::PipelineError;
