use std::path::Path;

use crate::error::DatasetError;

/// Sorted color and depth image listings for an extracted RGB-D dataset.
///
/// The dataset layout is a frames directory containing `color/` with
/// indexed jpg/png images and `depth/` with matching png images. Frames
/// pair up by sorted position; a count mismatch truncates to the shorter
/// listing.
#[derive(Debug, Clone)]
pub struct RgbdFrameList {
    /// Sorted color image file names.
    pub color: Vec<String>,
    /// Sorted depth image file names.
    pub depth: Vec<String>,
}

impl RgbdFrameList {
    /// Scan a frames directory for color and depth images.
    ///
    /// # Arguments
    ///
    /// * `frames_dir` - Directory containing `color/` and `depth/`.
    ///
    /// # Returns
    ///
    /// The sorted listings. Missing subdirectories are an error; a frame
    /// count mismatch is only a warning.
    pub fn scan(frames_dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let color_dir = frames_dir.as_ref().join("color");
        let depth_dir = frames_dir.as_ref().join("depth");

        let color = list_images(&color_dir, &["jpg", "png"])?;
        let depth = list_images(&depth_dir, &["png"])?;

        if color.len() != depth.len() {
            log::warn!(
                "frame count mismatch: {} color vs {} depth, pairing truncates to {}",
                color.len(),
                depth.len(),
                color.len().min(depth.len())
            );
        }

        Ok(Self { color, depth })
    }

    /// Number of usable color/depth pairs.
    pub fn paired_len(&self) -> usize {
        self.color.len().min(self.depth.len())
    }

    /// Check whether no frame pairs are available.
    pub fn is_empty(&self) -> bool {
        self.paired_len() == 0
    }
}

fn list_images(dir: &Path, extensions: &[&str]) -> Result<Vec<String>, DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::MissingDirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && matches {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
