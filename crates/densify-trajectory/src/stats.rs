use crate::tum::TumPose;

/// Timing diagnostics over an ordered pose sequence.
///
/// Purely informational; has no effect on serialized output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStats {
    /// Timestamp of the first pose, seconds.
    pub first_timestamp: f64,
    /// Timestamp of the last pose, seconds.
    pub last_timestamp: f64,
    /// Elapsed seconds between the first and last poses.
    pub duration: f64,
    /// Poses per second, zero when the duration is not positive.
    pub avg_fps: f64,
}

impl TrajectoryStats {
    /// Compute statistics for a pose sequence, `None` when empty.
    pub fn from_poses(poses: &[TumPose]) -> Option<Self> {
        let first = poses.first()?;
        let last = poses.last()?;
        let duration = last.timestamp - first.timestamp;
        let avg_fps = if duration > 0.0 {
            poses.len() as f64 / duration
        } else {
            0.0
        };
        Some(Self {
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
            duration,
            avg_fps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pose_at(timestamp: f64) -> TumPose {
        TumPose {
            timestamp,
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn test_two_poses_one_second_apart() {
        let stats = TrajectoryStats::from_poses(&[pose_at(0.0), pose_at(1.0)]).unwrap();
        assert_relative_eq!(stats.duration, 1.0);
        assert_relative_eq!(stats.avg_fps, 2.0);
        assert_relative_eq!(stats.first_timestamp, 0.0);
        assert_relative_eq!(stats.last_timestamp, 1.0);
    }

    #[test]
    fn test_zero_duration_gives_zero_rate() {
        let stats = TrajectoryStats::from_poses(&[pose_at(2.0), pose_at(2.0)]).unwrap();
        assert_relative_eq!(stats.duration, 0.0);
        assert_relative_eq!(stats.avg_fps, 0.0);
    }

    #[test]
    fn test_empty_sequence_has_no_stats() {
        assert!(TrajectoryStats::from_poses(&[]).is_none());
    }

    #[test]
    fn test_single_pose() {
        let stats = TrajectoryStats::from_poses(&[pose_at(3.0)]).unwrap();
        assert_relative_eq!(stats.duration, 0.0);
        assert_relative_eq!(stats.avg_fps, 0.0);
    }
}
