/// Error types for the trajectory module.
#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// A numeric field of a pose record could not be parsed
    #[error("malformed pose record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the input file.
        line: usize,
        /// The field that failed to parse and why.
        reason: String,
    },

    /// A quaternion with zero norm cannot be normalized
    #[error("degenerate quaternion at pose index {index}")]
    DegenerateQuaternion {
        /// Index of the offending pose in input order.
        index: usize,
    },

    /// A pose rotation block is not invertible
    #[error("singular transform at pose index {index}")]
    SingularTransform {
        /// Index of the offending pose in input order.
        index: usize,
    },

    /// No poses were parsed, nothing to convert
    #[error("empty trajectory: no poses parsed from input")]
    EmptyTrajectory,

    /// Failed to serialize the pose graph
    #[error("failed to serialize pose graph")]
    Json(#[from] serde_json::Error),
}
