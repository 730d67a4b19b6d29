use std::path::PathBuf;

use densify_dataset::DatasetError;
use densify_trajectory::TrajectoryError;

/// Error types for the pipeline module.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Failed to deserialize the configuration file
    #[error("failed to deserialize configuration file")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration carries invalid values
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Trajectory conversion failed
    #[error("trajectory conversion failed")]
    Trajectory(#[from] TrajectoryError),

    /// Dataset access failed
    #[error("dataset access failed")]
    Dataset(#[from] DatasetError),

    /// An external collaborator exited with a non-zero status
    #[error("stage '{stage}' failed with exit code {code}")]
    StageFailed {
        /// Name of the failing stage.
        stage: &'static str,
        /// The collaborator's exit code, -1 when killed by a signal.
        code: i32,
    },

    /// A stage finished without producing its expected output file
    #[error("stage '{stage}' did not produce expected artifact: {path}")]
    MissingArtifact {
        /// Name of the stage whose output is missing.
        stage: &'static str,
        /// The expected artifact path.
        path: PathBuf,
    },
}
