#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Association file writing for the external tracker.
pub mod associations;

/// Error types for dataset access.
pub mod error;

/// RGB-D frame directory listings.
pub mod frames;

/// Camera intrinsics JSON record.
pub mod intrinsics;

pub use error::DatasetError;
