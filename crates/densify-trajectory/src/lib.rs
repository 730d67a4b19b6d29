#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// One-shot TUM-to-Open3D file conversion.
pub mod convert;

/// Error types for trajectory conversion.
pub mod error;

/// Open3D trajectory log reading and writing.
pub mod log_format;

/// Open3D pose graph construction and serialization.
pub mod pose_graph;

/// Trajectory timing diagnostics.
pub mod stats;

/// Quaternion and homogeneous transform conversion.
pub mod transforms;

/// TUM trajectory file parsing.
pub mod tum;

pub use error::TrajectoryError;
