use std::process::Command;

use densify_dataset::{associations, frames::RgbdFrameList, intrinsics::CameraIntrinsics};
use densify_trajectory::convert::convert_tum_file;

use crate::{config::PipelineConfig, error::PipelineError};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Write the association file for the tracker.
    Associations,
    /// Run the external tracker.
    Tracking,
    /// Convert the TUM trajectory into the Open3D formats.
    Conversion,
    /// Run the external fusion collaborator.
    Reconstruction,
}

impl Stage {
    /// Stage name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Associations => "associations",
            Self::Tracking => "tracking",
            Self::Conversion => "conversion",
            Self::Reconstruction => "reconstruction",
        }
    }

    /// 1-based position in the pipeline.
    pub fn step(&self) -> u32 {
        match self {
            Self::Associations => 1,
            Self::Tracking => 2,
            Self::Conversion => 3,
            Self::Reconstruction => 4,
        }
    }

    /// Look up a stage by its 1-based position.
    pub fn from_step(step: u32) -> Option<Self> {
        match step {
            1 => Some(Self::Associations),
            2 => Some(Self::Tracking),
            3 => Some(Self::Conversion),
            4 => Some(Self::Reconstruction),
            _ => None,
        }
    }
}

/// Run all stages at or after `start`, sequentially and fail-fast.
///
/// Each run is a pure batch transformation with no state shared across
/// invocations; failures abort without retry.
///
/// # Arguments
///
/// * `config` - The validated run configuration.
/// * `start` - The first stage to execute.
pub fn run_pipeline(config: &PipelineConfig, start: Stage) -> Result<(), PipelineError> {
    std::fs::create_dir_all(config.sparse_dir())?;
    std::fs::create_dir_all(config.dense_dir())?;

    if start <= Stage::Associations {
        run_associations(config)?;
    }
    if start <= Stage::Tracking {
        run_tracking(config)?;
    }
    if start <= Stage::Conversion {
        run_conversion(config)?;
    }
    if start <= Stage::Reconstruction {
        run_reconstruction(config)?;
    }

    log::info!("pipeline complete, outputs under {}", config.output.base_dir.display());
    Ok(())
}

/// Scan the frames directory and write the association file.
pub fn run_associations(config: &PipelineConfig) -> Result<(), PipelineError> {
    let frames = RgbdFrameList::scan(&config.dataset.frames_dir)?;
    log::info!(
        "found {} color and {} depth frames",
        frames.color.len(),
        frames.depth.len()
    );

    associations::write_associations(&frames, config.associations_path(), config.association.fps)?;
    log::info!(
        "wrote {} associations to {}",
        frames.paired_len(),
        config.associations_path().display()
    );
    Ok(())
}

/// Invoke the external tracker.
///
/// The tracker is called as
/// `<command> [args...] <frames_dir> <associations_file> <trajectory_out>`
/// and must write a TUM trajectory to the given output path.
pub fn run_tracking(config: &PipelineConfig) -> Result<(), PipelineError> {
    let trajectory_path = config.trajectory_tum_path();

    let mut command = Command::new(&config.tracking.command);
    command
        .args(&config.tracking.args)
        .arg(&config.dataset.frames_dir)
        .arg(config.associations_path())
        .arg(&trajectory_path);
    run_stage_command(Stage::Tracking.name(), &mut command)?;

    if !trajectory_path.is_file() {
        return Err(PipelineError::MissingArtifact {
            stage: Stage::Tracking.name(),
            path: trajectory_path,
        });
    }
    Ok(())
}

/// Convert the tracker's TUM trajectory into both Open3D formats.
pub fn run_conversion(config: &PipelineConfig) -> Result<(), PipelineError> {
    let summary = convert_tum_file(
        config.trajectory_tum_path(),
        config.trajectory_log_path(),
        config.pose_graph_path(),
    )?;
    log::info!(
        "converted {} poses, duration {:.2} s, average rate {:.2} poses/s",
        summary.pose_count,
        summary.stats.duration,
        summary.stats.avg_fps
    );
    Ok(())
}

/// Invoke the external fusion collaborator for the requested outputs.
pub fn run_reconstruction(config: &PipelineConfig) -> Result<(), PipelineError> {
    // validates the record before spending time on fusion
    let intrinsics = CameraIntrinsics::from_json_file(&config.dataset.intrinsics_file)?;
    log::info!(
        "camera {}x{}, fx={:.2} fy={:.2} cx={:.2} cy={:.2}",
        intrinsics.width,
        intrinsics.height,
        intrinsics.fx(),
        intrinsics.fy(),
        intrinsics.cx(),
        intrinsics.cy()
    );

    let trajectory_log = config.trajectory_log_path();
    if !trajectory_log.is_file() {
        return Err(PipelineError::MissingArtifact {
            stage: Stage::Reconstruction.name(),
            path: trajectory_log,
        });
    }

    if config.reconstruction.mode.wants_mesh() {
        let mesh = &config.reconstruction.mesh;
        let mut command = Command::new(&config.reconstruction.fusion_command);
        command
            .arg("--mode")
            .arg("mesh")
            .arg("--frames_dir")
            .arg(&config.dataset.frames_dir)
            .arg("--intrinsic")
            .arg(&config.dataset.intrinsics_file)
            .arg("--trajectory")
            .arg(&trajectory_log)
            .arg("--output")
            .arg(config.mesh_path())
            .arg("--voxel_size")
            .arg(mesh.voxel_size.to_string())
            .arg("--depth_max")
            .arg(mesh.depth_max.to_string());
        run_stage_command(Stage::Reconstruction.name(), &mut command)?;
    }

    if config.reconstruction.mode.wants_pointcloud() {
        std::fs::create_dir_all(config.pointcloud_dir())?;

        let pointcloud = &config.reconstruction.pointcloud;
        let mut command = Command::new(&config.reconstruction.fusion_command);
        command
            .arg("--mode")
            .arg("pointcloud")
            .arg("--frames_dir")
            .arg(&config.dataset.frames_dir)
            .arg("--intrinsic")
            .arg(&config.dataset.intrinsics_file)
            .arg("--trajectory")
            .arg(&trajectory_log)
            .arg("--output_dir")
            .arg(config.pointcloud_dir())
            .arg("--depth_scale")
            .arg(intrinsics.depth_scale.to_string())
            .arg("--depth_max")
            .arg(pointcloud.depth_max.to_string())
            .arg("--downsample_voxel")
            .arg(pointcloud.downsample_voxel.to_string())
            .arg("--frame_skip")
            .arg(pointcloud.frame_skip.to_string());
        run_stage_command(Stage::Reconstruction.name(), &mut command)?;
    }

    Ok(())
}

fn run_stage_command(stage: &'static str, command: &mut Command) -> Result<(), PipelineError> {
    log::info!("running stage '{}': {:?}", stage, command);
    let status = command.status()?;
    if !status.success() {
        return Err(PipelineError::StageFailed {
            stage,
            code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
