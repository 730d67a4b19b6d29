use std::path::Path;

use crate::{error::DatasetError, frames::RgbdFrameList};

/// Render a TUM-style association file for the external tracker.
///
/// The tracker only needs relative timing, so timestamps are synthesized
/// from the frame index at a fixed assumed rate. One line per pair:
/// `<t> color/<name> <t> depth/<name>` with 6 fractional digits.
///
/// # Arguments
///
/// * `frames` - The scanned frame listings.
/// * `fps` - The assumed capture rate, must be positive.
///
/// # Returns
///
/// The association file contents.
pub fn associations_string(frames: &RgbdFrameList, fps: f64) -> Result<String, DatasetError> {
    if fps <= 0.0 {
        return Err(DatasetError::InvalidFrameRate(fps));
    }
    let n = frames.paired_len();
    if n == 0 {
        return Err(DatasetError::EmptyDataset);
    }

    let mut out = String::new();
    for i in 0..n {
        let timestamp = i as f64 / fps;
        out.push_str(&format!(
            "{:.6} color/{} {:.6} depth/{}\n",
            timestamp, frames.color[i], timestamp, frames.depth[i]
        ));
    }
    Ok(out)
}

/// Write the association file, rendering it fully before creating the
/// file.
///
/// # Arguments
///
/// * `frames` - The scanned frame listings.
/// * `path` - The output file path.
/// * `fps` - The assumed capture rate.
pub fn write_associations(
    frames: &RgbdFrameList,
    path: impl AsRef<Path>,
    fps: f64,
) -> Result<(), DatasetError> {
    std::fs::write(path, associations_string(frames, fps)?)?;
    Ok(())
}
