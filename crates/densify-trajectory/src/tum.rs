use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::TrajectoryError;

/// One tracked camera observation in TUM format.
#[derive(Debug, Clone, PartialEq)]
pub struct TumPose {
    /// Timestamp in seconds.
    pub timestamp: f64,
    /// Camera position in the tracking reference frame.
    pub translation: [f64; 3],
    /// Orientation quaternion in (qx, qy, qz, qw) order. Stored precision
    /// may drift from unit length; normalized again at conversion time.
    pub rotation: [f64; 4],
}

/// Read a TUM trajectory file and return the poses in file order.
///
/// Each non-empty, non-comment line must carry at least 8
/// whitespace-separated fields: `timestamp tx ty tz qx qy qz qw`.
/// Blank lines, `#` comments, and lines with fewer than 8 fields are
/// skipped; a field that fails to parse as a number is a hard error.
///
/// # Arguments
///
/// * `path` - The path to the trajectory file.
///
/// # Returns
///
/// A vector of TumPose structs in file order.
pub fn read_tum_trajectory(path: impl AsRef<Path>) -> Result<Vec<TumPose>, TrajectoryError> {
    let file = File::open(path)?;
    read_tum_from_reader(BufReader::new(file))
}

/// Read TUM pose lines from any buffered reader.
pub fn read_tum_from_reader<R: BufRead>(reader: R) -> Result<Vec<TumPose>, TrajectoryError> {
    let mut poses = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(pose) = parse_pose_line(&line, idx + 1)? {
            poses.push(pose);
        }
    }
    Ok(poses)
}

/// Utility function for parsing one whitespace-separated field.
fn parse_field<T: std::str::FromStr>(s: &str, line: usize) -> Result<T, TrajectoryError>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| TrajectoryError::MalformedRecord {
            line,
            reason: format!("{}: {}", s, e),
        })
}

/// Parse one pose line, returning `None` for skipped lines.
fn parse_pose_line(line: &str, line_no: usize) -> Result<Option<TumPose>, TrajectoryError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts = trimmed.split_whitespace().collect::<Vec<_>>();
    if parts.len() < 8 {
        return Ok(None);
    }

    Ok(Some(TumPose {
        timestamp: parse_field(parts[0], line_no)?,
        translation: [
            parse_field(parts[1], line_no)?,
            parse_field(parts[2], line_no)?,
            parse_field(parts[3], line_no)?,
        ],
        rotation: [
            parse_field(parts[4], line_no)?,
            parse_field(parts[5], line_no)?,
            parse_field(parts[6], line_no)?,
            parse_field(parts[7], line_no)?,
        ],
    }))
}
