use std::path::PathBuf;

/// Error types for the dataset module.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Failed to deserialize the intrinsics record
    #[error("failed to deserialize intrinsics record")]
    Json(#[from] serde_json::Error),

    /// An expected dataset directory does not exist
    #[error("missing dataset directory: {0}")]
    MissingDirectory(PathBuf),

    /// The intrinsics record carries invalid values
    #[error("invalid intrinsics: {0}")]
    InvalidIntrinsics(String),

    /// The assumed frame rate must be positive
    #[error("invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    /// No color/depth frame pairs were found
    #[error("empty dataset: no color/depth frame pairs found")]
    EmptyDataset,
}
