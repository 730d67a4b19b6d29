use std::path::Path;

use crate::{
    error::TrajectoryError, log_format, pose_graph::PoseGraph, stats::TrajectoryStats, transforms,
    tum,
};

/// Summary of one conversion run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertSummary {
    /// Number of poses converted.
    pub pose_count: usize,
    /// Timing diagnostics of the input sequence.
    pub stats: TrajectoryStats,
}

/// Convert a TUM trajectory file into the Open3D log and pose graph files.
///
/// Both outputs are fully constructed and validated in memory before
/// either file is created, so a failing run writes nothing.
///
/// # Arguments
///
/// * `input` - The TUM trajectory file from the tracker.
/// * `output_log` - Destination for the Open3D trajectory log.
/// * `output_json` - Destination for the pose graph JSON.
///
/// # Returns
///
/// A summary with the pose count and timing statistics.
pub fn convert_tum_file(
    input: impl AsRef<Path>,
    output_log: impl AsRef<Path>,
    output_json: impl AsRef<Path>,
) -> Result<ConvertSummary, TrajectoryError> {
    let poses = tum::read_tum_trajectory(input)?;
    let transforms = transforms::convert_trajectory(&poses)?;
    let graph = PoseGraph::from_transforms(&transforms)?;
    let stats = TrajectoryStats::from_poses(&poses).ok_or(TrajectoryError::EmptyTrajectory)?;

    log_format::write_trajectory_log(output_log, &transforms)?;
    graph.write_json(output_json)?;

    Ok(ConvertSummary {
        pose_count: poses.len(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_writes_both_outputs() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("CameraTrajectory.txt");
        let output_log = dir.path().join("trajectory_open3d.log");
        let output_json = dir.path().join("trajectory_posegraph.json");
        std::fs::write(&input, "0.0 0 0 0 0 0 0 1\n1.0 1 0 0 0 0 0 1\n")?;

        let summary = convert_tum_file(&input, &output_log, &output_json)?;
        assert_eq!(summary.pose_count, 2);
        assert_relative_eq!(summary.stats.duration, 1.0);
        assert_relative_eq!(summary.stats.avg_fps, 2.0);
        assert!(output_log.exists());
        assert!(output_json.exists());
        Ok(())
    }

    #[test]
    fn test_comments_only_input_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("CameraTrajectory.txt");
        let output_log = dir.path().join("trajectory_open3d.log");
        let output_json = dir.path().join("trajectory_posegraph.json");
        std::fs::write(&input, "# header only\n\n# nothing else\n")?;

        let err = convert_tum_file(&input, &output_log, &output_json).unwrap_err();
        assert!(matches!(err, TrajectoryError::EmptyTrajectory));
        assert!(!output_log.exists());
        assert!(!output_json.exists());
        Ok(())
    }

    #[test]
    fn test_zero_norm_quaternion_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("CameraTrajectory.txt");
        let output_log = dir.path().join("trajectory_open3d.log");
        let output_json = dir.path().join("trajectory_posegraph.json");
        std::fs::write(&input, "0.0 0 0 0 0 0 0 1\n1.0 0 0 0 0 0 0 0\n")?;

        let err = convert_tum_file(&input, &output_log, &output_json).unwrap_err();
        match err {
            TrajectoryError::DegenerateQuaternion { index } => assert_eq!(index, 1),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!output_log.exists());
        assert!(!output_json.exists());
        Ok(())
    }
}
