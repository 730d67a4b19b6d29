use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PipelineError;

/// Dataset input locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Directory containing `color/` and `depth/` frame folders.
    pub frames_dir: PathBuf,
    /// Camera intrinsics JSON record for the recording.
    pub intrinsics_file: PathBuf,
}

/// External tracker invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingConfig {
    /// The tracker executable or wrapper script.
    pub command: PathBuf,
    /// Extra arguments placed before the positional inputs.
    #[serde(default)]
    pub args: Vec<String>,
    /// TUM trajectory file the tracker writes into the sparse output
    /// directory.
    #[serde(default = "default_trajectory_name")]
    pub trajectory_name: String,
}

fn default_trajectory_name() -> String {
    "CameraTrajectory.txt".to_string()
}

/// What the fusion collaborator should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconstructionMode {
    /// TSDF mesh only.
    Mesh,
    /// Per-frame point cloud export only.
    Pointcloud,
    /// Both outputs.
    Both,
}

impl ReconstructionMode {
    /// Whether the mesh output is requested.
    pub fn wants_mesh(&self) -> bool {
        matches!(self, Self::Mesh | Self::Both)
    }

    /// Whether the point cloud output is requested.
    pub fn wants_pointcloud(&self) -> bool {
        matches!(self, Self::Pointcloud | Self::Both)
    }
}

/// TSDF mesh parameters passed through to the fusion collaborator.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshConfig {
    /// TSDF voxel size in meters.
    #[serde(default = "default_voxel_size")]
    pub voxel_size: f64,
    /// Maximum integrated depth in meters.
    #[serde(default = "default_depth_max")]
    pub depth_max: f64,
}

fn default_voxel_size() -> f64 {
    0.01
}

fn default_depth_max() -> f64 {
    3.0
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            voxel_size: default_voxel_size(),
            depth_max: default_depth_max(),
        }
    }
}

/// Point cloud export parameters passed through to the fusion
/// collaborator.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointcloudConfig {
    /// Maximum depth in meters.
    #[serde(default = "default_depth_max")]
    pub depth_max: f64,
    /// Downsampling voxel size in meters, 0 disables downsampling.
    #[serde(default)]
    pub downsample_voxel: f64,
    /// Process every Nth frame.
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u32,
}

fn default_frame_skip() -> u32 {
    1
}

impl Default for PointcloudConfig {
    fn default() -> Self {
        Self {
            depth_max: default_depth_max(),
            downsample_voxel: 0.0,
            frame_skip: default_frame_skip(),
        }
    }
}

/// External fusion invocation and its parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconstructionConfig {
    /// Requested outputs.
    #[serde(default = "default_mode")]
    pub mode: ReconstructionMode,
    /// The fusion executable or wrapper script.
    pub fusion_command: PathBuf,
    /// TSDF mesh parameters.
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Point cloud export parameters.
    #[serde(default)]
    pub pointcloud: PointcloudConfig,
}

fn default_mode() -> ReconstructionMode {
    ReconstructionMode::Mesh
}

/// Output directory layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Root of all run outputs.
    pub base_dir: PathBuf,
    /// Sparse (trajectory) output subdirectory.
    #[serde(default = "default_sparse_dir")]
    pub sparse_dir: String,
    /// Dense (reconstruction) output subdirectory.
    #[serde(default = "default_dense_dir")]
    pub dense_dir: String,
    /// Mesh file name inside the dense directory.
    #[serde(default = "default_mesh_name")]
    pub mesh_name: String,
    /// Point cloud subdirectory inside the dense directory.
    #[serde(default = "default_pointcloud_dir")]
    pub pointcloud_dir: String,
}

fn default_sparse_dir() -> String {
    "sparse".to_string()
}

fn default_dense_dir() -> String {
    "dense".to_string()
}

fn default_mesh_name() -> String {
    "mesh.ply".to_string()
}

fn default_pointcloud_dir() -> String {
    "pointclouds".to_string()
}

/// Association file parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationConfig {
    /// Assumed capture rate for synthetic timestamps.
    #[serde(default = "default_fps")]
    pub fps: f64,
}

fn default_fps() -> f64 {
    30.0
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

/// Immutable configuration for one pipeline run.
///
/// Loaded once from YAML, validated at load time, then passed by
/// reference into each stage. Unknown or mistyped keys fail the load
/// rather than surfacing at point of use.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Dataset inputs.
    pub dataset: DatasetConfig,
    /// External tracker invocation.
    pub tracking: TrackingConfig,
    /// External fusion invocation.
    pub reconstruction: ReconstructionConfig,
    /// Output layout.
    pub output: OutputConfig,
    /// Association file parameters.
    #[serde(default)]
    pub association: AssociationConfig,
}

impl PipelineConfig {
    /// Load and validate a configuration from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the YAML configuration.
    ///
    /// # Returns
    ///
    /// The validated configuration.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.association.fps <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "association.fps must be positive, got {}",
                self.association.fps
            )));
        }
        if self.reconstruction.mesh.voxel_size <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "reconstruction.mesh.voxel_size must be positive, got {}",
                self.reconstruction.mesh.voxel_size
            )));
        }
        if self.reconstruction.mesh.depth_max <= 0.0
            || self.reconstruction.pointcloud.depth_max <= 0.0
        {
            return Err(PipelineError::InvalidConfig(
                "depth_max must be positive".to_string(),
            ));
        }
        if self.reconstruction.pointcloud.frame_skip == 0 {
            return Err(PipelineError::InvalidConfig(
                "reconstruction.pointcloud.frame_skip must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The sparse output directory.
    pub fn sparse_dir(&self) -> PathBuf {
        self.output.base_dir.join(&self.output.sparse_dir)
    }

    /// The dense output directory.
    pub fn dense_dir(&self) -> PathBuf {
        self.output.base_dir.join(&self.output.dense_dir)
    }

    /// The association file path.
    pub fn associations_path(&self) -> PathBuf {
        self.output.base_dir.join("associations.txt")
    }

    /// The tracker's TUM trajectory output path.
    pub fn trajectory_tum_path(&self) -> PathBuf {
        self.sparse_dir().join(&self.tracking.trajectory_name)
    }

    /// The converted Open3D trajectory log path.
    pub fn trajectory_log_path(&self) -> PathBuf {
        self.sparse_dir().join("trajectory_open3d.log")
    }

    /// The converted pose graph JSON path.
    pub fn pose_graph_path(&self) -> PathBuf {
        self.sparse_dir().join("trajectory_posegraph.json")
    }

    /// The mesh output path.
    pub fn mesh_path(&self) -> PathBuf {
        self.dense_dir().join(&self.output.mesh_name)
    }

    /// The point cloud output directory.
    pub fn pointcloud_dir(&self) -> PathBuf {
        self.dense_dir().join(&self.output.pointcloud_dir)
    }
}
