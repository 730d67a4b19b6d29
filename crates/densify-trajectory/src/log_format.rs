use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{error::TrajectoryError, transforms::Mat4};

/// Render a transform sequence as an Open3D trajectory log.
///
/// The output starts with a fixed 4-line comment header and carries one
/// line per transform: 16 row-major values, 12 fractional digits, single
/// space separated. Byte-identical output for identical input, since
/// downstream tools diff trajectory logs and may parse by column.
pub fn trajectory_log_string(transforms: &[Mat4]) -> String {
    let mut out = String::new();
    out.push_str("# Open3D trajectory log\n");
    out.push_str(&format!("# Number of poses: {}\n", transforms.len()));
    out.push_str("# Format: 4x4 transformation matrix (row-major)\n");
    out.push_str("#\n");

    for transform in transforms {
        let line = transform
            .iter()
            .flatten()
            .map(|v| format!("{:.12}", v))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Write a transform sequence as an Open3D trajectory log file.
///
/// The full log is rendered in memory before the file is created, so a
/// failed run never leaves a half-written log behind.
///
/// # Arguments
///
/// * `path` - The output file path.
/// * `transforms` - The ordered transform sequence.
pub fn write_trajectory_log(
    path: impl AsRef<Path>,
    transforms: &[Mat4],
) -> Result<(), TrajectoryError> {
    if transforms.is_empty() {
        return Err(TrajectoryError::EmptyTrajectory);
    }
    std::fs::write(path, trajectory_log_string(transforms))?;
    Ok(())
}

/// Read an Open3D trajectory log file back into transforms.
///
/// Comment and blank lines are skipped, as are lines that do not carry
/// exactly 16 fields; a field that fails to parse as a number is a hard
/// error.
///
/// # Arguments
///
/// * `path` - The path to the trajectory log file.
///
/// # Returns
///
/// A vector of 4x4 transforms in file order.
pub fn read_trajectory_log(path: impl AsRef<Path>) -> Result<Vec<Mat4>, TrajectoryError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut transforms = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(transform) = parse_log_line(&line, idx + 1)? {
            transforms.push(transform);
        }
    }
    Ok(transforms)
}

fn parse_log_line(line: &str, line_no: usize) -> Result<Option<Mat4>, TrajectoryError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts = trimmed.split_whitespace().collect::<Vec<_>>();
    if parts.len() != 16 {
        return Ok(None);
    }

    let mut transform = [[0.0; 4]; 4];
    for (k, part) in parts.iter().enumerate() {
        transform[k / 4][k % 4] =
            part.parse::<f64>()
                .map_err(|e| TrajectoryError::MalformedRecord {
                    line: line_no,
                    reason: format!("{}: {}", part, e),
                })?;
    }
    Ok(Some(transform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::MAT4_IDENTITY;

    #[test]
    fn test_header_and_line_format() {
        let log = trajectory_log_string(&[MAT4_IDENTITY]);
        let lines = log.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "# Open3D trajectory log");
        assert_eq!(lines[1], "# Number of poses: 1");
        assert_eq!(lines[2], "# Format: 4x4 transformation matrix (row-major)");
        assert_eq!(lines[3], "#");
        assert!(lines[4].starts_with("1.000000000000 0.000000000000"));
        assert_eq!(lines[4].split_whitespace().count(), 16);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let transforms = vec![
            MAT4_IDENTITY,
            [
                [0.0, -1.0, 0.0, 0.5],
                [1.0, 0.0, 0.0, -0.25],
                [0.0, 0.0, 1.0, 1.0 / 3.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        ];
        assert_eq!(
            trajectory_log_string(&transforms),
            trajectory_log_string(&transforms)
        );
    }

    #[test]
    fn test_write_refuses_empty_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("trajectory.log");
        let err = write_trajectory_log(&path, &[]).unwrap_err();
        assert!(matches!(err, TrajectoryError::EmptyTrajectory));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_write_read_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("trajectory.log");
        let transforms = vec![
            MAT4_IDENTITY,
            [
                [1.0, 0.0, 0.0, 1.5],
                [0.0, 1.0, 0.0, -2.0],
                [0.0, 0.0, 1.0, 0.125],
                [0.0, 0.0, 0.0, 1.0],
            ],
        ];
        write_trajectory_log(&path, &transforms)?;
        let loaded = read_trajectory_log(&path)?;
        assert_eq!(loaded, transforms);
        Ok(())
    }
}
