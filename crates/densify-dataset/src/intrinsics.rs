use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

fn default_depth_scale() -> f64 {
    1000.0
}

/// Pinhole camera intrinsics record written by the capture/extraction
/// step.
///
/// The 9-element `intrinsic_matrix` embeds the focal lengths on the
/// diagonal (indices 0 and 4) and the principal point at indices 6 and 7,
/// matching the Open3D on-disk convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// The 3x3 intrinsic matrix flattened to 9 elements.
    pub intrinsic_matrix: [f64; 9],
    /// Depth units per meter; 1000 means millimeter depth images.
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f64,
}

impl CameraIntrinsics {
    /// Load and validate an intrinsics record from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the intrinsics JSON file.
    ///
    /// # Returns
    ///
    /// The validated record.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        let intrinsics: Self = serde_json::from_str(&contents)?;
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    /// Validate the record, failing fast on values that would corrupt
    /// reprojection downstream.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.width == 0 || self.height == 0 {
            return Err(DatasetError::InvalidIntrinsics(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fx() <= 0.0 || self.fy() <= 0.0 {
            return Err(DatasetError::InvalidIntrinsics(format!(
                "focal lengths must be positive, got fx={} fy={}",
                self.fx(),
                self.fy()
            )));
        }
        if self.depth_scale <= 0.0 {
            return Err(DatasetError::InvalidIntrinsics(format!(
                "depth scale must be positive, got {}",
                self.depth_scale
            )));
        }
        Ok(())
    }

    /// The focal length in x, pixels.
    pub fn fx(&self) -> f64 {
        self.intrinsic_matrix[0]
    }

    /// The focal length in y, pixels.
    pub fn fy(&self) -> f64 {
        self.intrinsic_matrix[4]
    }

    /// The principal point x coordinate, pixels.
    pub fn cx(&self) -> f64 {
        self.intrinsic_matrix[6]
    }

    /// The principal point y coordinate, pixels.
    pub fn cy(&self) -> f64 {
        self.intrinsic_matrix[7]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RECORD: &str = r#"{
        "width": 640,
        "height": 480,
        "intrinsic_matrix": [615.0, 0.0, 0.0, 0.0, 615.5, 0.0, 320.25, 240.75, 1.0]
    }"#;

    #[test]
    fn test_parse_record_with_default_depth_scale() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("intrinsic.json");
        std::fs::write(&path, RECORD)?;

        let intrinsics = CameraIntrinsics::from_json_file(&path)?;
        assert_eq!(intrinsics.width, 640);
        assert_eq!(intrinsics.height, 480);
        assert_relative_eq!(intrinsics.fx(), 615.0);
        assert_relative_eq!(intrinsics.fy(), 615.5);
        assert_relative_eq!(intrinsics.cx(), 320.25);
        assert_relative_eq!(intrinsics.cy(), 240.75);
        assert_relative_eq!(intrinsics.depth_scale, 1000.0);
        Ok(())
    }

    #[test]
    fn test_zero_focal_length_is_rejected() {
        let intrinsics = CameraIntrinsics {
            width: 640,
            height: 480,
            intrinsic_matrix: [0.0; 9],
            depth_scale: 1000.0,
        };
        assert!(matches!(
            intrinsics.validate(),
            Err(DatasetError::InvalidIntrinsics(_))
        ));
    }

    #[test]
    fn test_zero_image_size_is_rejected() {
        let intrinsics = CameraIntrinsics {
            width: 0,
            height: 480,
            intrinsic_matrix: [615.0, 0.0, 0.0, 0.0, 615.0, 0.0, 320.0, 240.0, 1.0],
            depth_scale: 1000.0,
        };
        assert!(matches!(
            intrinsics.validate(),
            Err(DatasetError::InvalidIntrinsics(_))
        ));
    }

    #[test]
    fn test_missing_key_is_a_hard_error() {
        let result = serde_json::from_str::<CameraIntrinsics>(r#"{"width": 640}"#);
        assert!(result.is_err());
    }
}
