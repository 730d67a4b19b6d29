use std::path::Path;

use serde::Serialize;

use crate::{
    error::TrajectoryError,
    transforms::{mat4_inverse, mat4_mul, rotation_determinant, Mat4},
};

/// Rotation blocks with an absolute determinant below this are treated as
/// non-invertible.
const SINGULARITY_EPS: f64 = 1e-12;

/// One absolute camera pose in the graph.
#[derive(Debug, Clone, Serialize)]
pub struct PoseGraphNode {
    /// Schema tag, always `"PoseGraphNode"`.
    pub class_name: String,
    /// Schema major version.
    pub version_major: u32,
    /// Schema minor version.
    pub version_minor: u32,
    /// Absolute camera pose, row-major 4x4.
    pub pose: Mat4,
}

/// One odometry edge between consecutive nodes.
#[derive(Debug, Clone, Serialize)]
pub struct PoseGraphEdge {
    /// Schema tag, always `"PoseGraphEdge"`.
    pub class_name: String,
    /// Schema major version.
    pub version_major: u32,
    /// Schema minor version.
    pub version_minor: u32,
    /// Index of the earlier pose.
    pub source_node_id: usize,
    /// Index of the later pose.
    pub target_node_id: usize,
    /// Camera motion between the two frames, expressed in the source
    /// frame: `inv(pose[source]) * pose[target]`.
    pub transformation: Mat4,
    /// Placeholder uncertainty, fixed 6x6 identity. The converter
    /// computes no real covariance.
    pub information: [[f64; 6]; 6],
    /// Always false for odometry edges emitted by this converter.
    pub uncertain: bool,
}

/// A chain pose graph in the Open3D JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct PoseGraph {
    /// Schema tag, always `"PoseGraph"`.
    pub class_name: String,
    /// Schema major version.
    pub version_major: u32,
    /// Schema minor version.
    pub version_minor: u32,
    /// One node per input pose, in input order.
    pub nodes: Vec<PoseGraphNode>,
    /// One edge per consecutive node pair: exactly N-1 edges for N nodes.
    pub edges: Vec<PoseGraphEdge>,
}

fn identity6() -> [[f64; 6]; 6] {
    let mut m = [[0.0; 6]; 6];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

impl PoseGraph {
    /// Build a chain pose graph from an ordered transform sequence.
    ///
    /// Each edge's relative transform is computed via the matrix inverse
    /// of the earlier pose composed with the later pose, matching the
    /// documented edge semantics (motion expressed in the earlier frame).
    ///
    /// # Arguments
    ///
    /// * `transforms` - The ordered absolute camera poses.
    ///
    /// # Returns
    ///
    /// A graph with N nodes and N-1 edges.
    pub fn from_transforms(transforms: &[Mat4]) -> Result<Self, TrajectoryError> {
        if transforms.is_empty() {
            return Err(TrajectoryError::EmptyTrajectory);
        }

        let nodes = transforms
            .iter()
            .map(|transform| PoseGraphNode {
                class_name: "PoseGraphNode".to_string(),
                version_major: 1,
                version_minor: 0,
                pose: *transform,
            })
            .collect::<Vec<_>>();

        let edges = transforms
            .windows(2)
            .enumerate()
            .map(|(i, pair)| -> Result<PoseGraphEdge, TrajectoryError> {
                // should not occur given normalized quaternions upstream,
                // but malformed input could violate it
                if rotation_determinant(&pair[0]).abs() < SINGULARITY_EPS {
                    return Err(TrajectoryError::SingularTransform { index: i });
                }
                let inverse = mat4_inverse(&pair[0])
                    .ok_or(TrajectoryError::SingularTransform { index: i })?;

                Ok(PoseGraphEdge {
                    class_name: "PoseGraphEdge".to_string(),
                    version_major: 1,
                    version_minor: 0,
                    source_node_id: i,
                    target_node_id: i + 1,
                    transformation: mat4_mul(&inverse, &pair[1]),
                    information: identity6(),
                    uncertain: false,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            class_name: "PoseGraph".to_string(),
            version_major: 1,
            version_minor: 0,
            nodes,
            edges,
        })
    }

    /// Serialize the graph as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, TrajectoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the graph as a JSON file.
    ///
    /// The JSON is rendered in memory before the file is created.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TrajectoryError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::{convert_trajectory, MAT4_IDENTITY};
    use crate::tum::TumPose;
    use approx::assert_relative_eq;

    fn pose(timestamp: f64, translation: [f64; 3], rotation: [f64; 4]) -> TumPose {
        TumPose {
            timestamp,
            translation,
            rotation,
        }
    }

    #[test]
    fn test_node_and_edge_counts() -> Result<(), TrajectoryError> {
        for n in 1..5 {
            let poses = (0..n)
                .map(|i| pose(i as f64, [i as f64, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0]))
                .collect::<Vec<_>>();
            let graph = PoseGraph::from_transforms(&convert_trajectory(&poses)?)?;
            assert_eq!(graph.nodes.len(), n);
            assert_eq!(graph.edges.len(), n - 1);
            for (i, edge) in graph.edges.iter().enumerate() {
                assert_eq!(edge.source_node_id, i);
                assert_eq!(edge.target_node_id, i + 1);
            }
        }
        Ok(())
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        let err = PoseGraph::from_transforms(&[]).unwrap_err();
        assert!(matches!(err, TrajectoryError::EmptyTrajectory));
    }

    #[test]
    fn test_pure_translation_edge() -> Result<(), TrajectoryError> {
        let poses = vec![
            pose(0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0]),
            pose(1.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0]),
        ];
        let graph = PoseGraph::from_transforms(&convert_trajectory(&poses)?)?;
        assert_eq!(graph.edges.len(), 1);

        let rel = &graph.edges[0].transformation;
        let mut expected = MAT4_IDENTITY;
        expected[0][3] = 1.0;
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(rel[i][j], expected[i][j], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_identical_poses_give_identity_edge() -> Result<(), TrajectoryError> {
        let poses = vec![
            pose(0.0, [0.0; 3], [0.0, 0.0, 0.0, 1.0]),
            pose(1.0, [0.0; 3], [0.0, 0.0, 0.0, 1.0]),
        ];
        let graph = PoseGraph::from_transforms(&convert_trajectory(&poses)?)?;
        let rel = &graph.edges[0].transformation;
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(rel[i][j], MAT4_IDENTITY[i][j], epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_edge_composes_back_to_later_pose() -> Result<(), TrajectoryError> {
        let poses = vec![
            pose(0.0, [0.1, -0.2, 0.3], [0.1, -0.3, 0.2, 0.8]),
            pose(0.5, [0.4, 0.0, -0.1], [0.5, 0.5, 0.5, 0.5]),
            pose(1.0, [-0.3, 0.7, 0.2], [0.0, 0.0, 0.0, 1.0]),
        ];
        let transforms = convert_trajectory(&poses)?;
        let graph = PoseGraph::from_transforms(&transforms)?;

        for (i, edge) in graph.edges.iter().enumerate() {
            let recomposed = mat4_mul(&transforms[i], &edge.transformation);
            for r in 0..4 {
                for c in 0..4 {
                    assert_relative_eq!(
                        recomposed[r][c],
                        transforms[i + 1][r][c],
                        epsilon = 1e-9
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_singular_pose_is_rejected() {
        let mut degenerate = MAT4_IDENTITY;
        degenerate[0][0] = 0.0;
        degenerate[1][1] = 0.0;
        degenerate[1][0] = 1.0;
        degenerate[0][1] = 1.0;
        degenerate[2][2] = 0.0;
        // rank-deficient rotation block
        degenerate[2][0] = 1.0;
        let err = PoseGraph::from_transforms(&[degenerate, MAT4_IDENTITY]).unwrap_err();
        match err {
            TrajectoryError::SingularTransform { index } => assert_eq!(index, 0),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_json_schema_fields() -> Result<(), Box<dyn std::error::Error>> {
        let poses = vec![
            pose(0.0, [0.0; 3], [0.0, 0.0, 0.0, 1.0]),
            pose(1.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0]),
        ];
        let graph = PoseGraph::from_transforms(&convert_trajectory(&poses)?)?;
        let value: serde_json::Value = serde_json::from_str(&graph.to_json_string()?)?;

        assert_eq!(value["class_name"], "PoseGraph");
        assert_eq!(value["version_major"], 1);
        assert_eq!(value["version_minor"], 0);
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["edges"].as_array().map(Vec::len), Some(1));

        let node = &value["nodes"][0];
        assert_eq!(node["class_name"], "PoseGraphNode");
        assert_eq!(node["pose"][3][3], 1.0);

        let edge = &value["edges"][0];
        assert_eq!(edge["class_name"], "PoseGraphEdge");
        assert_eq!(edge["source_node_id"], 0);
        assert_eq!(edge["target_node_id"], 1);
        assert_eq!(edge["uncertain"], false);
        assert_eq!(edge["information"][0][0], 1.0);
        assert_eq!(edge["information"][0][1], 0.0);
        assert_eq!(edge["information"].as_array().map(Vec::len), Some(6));
        Ok(())
    }
}
