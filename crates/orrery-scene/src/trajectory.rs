//! Recorded position tables.
//!
//! A trajectory file holds one row per simulation step, each row three
//! whitespace-separated numbers `x y z`. Blank lines are ignored.
//! NaN and infinities are rejected.

use std::path::{Path, PathBuf};

use glam::DVec3;

/// Failure to read or parse one trajectory file.
#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: expected three numbers, found {content:?}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}: file contains no positions", path.display())]
    Empty { path: PathBuf },

    #[error("{}: loader worker exited without a result", path.display())]
    WorkerLost { path: PathBuf },
}

/// Parse trajectory text. `path` is only used in error messages.
pub fn parse_trajectory(path: &Path, text: &str) -> Result<Vec<DVec3>, TrajectoryError> {
    let mut positions = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parse_error = || TrajectoryError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            content: trimmed.to_string(),
        };

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let [x, y, z] = fields[..] else {
            return Err(parse_error());
        };
        let coord = |s: &str| match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(parse_error()),
        };
        positions.push(DVec3::new(coord(x)?, coord(y)?, coord(z)?));
    }

    if positions.is_empty() {
        return Err(TrajectoryError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(positions)
}

/// An ordered, non-empty table of recorded positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    positions: Vec<DVec3>,
}

impl Trajectory {
    /// Read and parse a trajectory file.
    pub fn load(path: &Path) -> Result<Self, TrajectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| TrajectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let positions = parse_trajectory(path, &text)?;
        Ok(Self { positions })
    }

    /// Wrap positions that are already in memory.
    pub fn from_positions(positions: Vec<DVec3>) -> Self {
        Self { positions }
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at `row`, holding the last row past the end.
    pub fn position(&self, row: usize) -> DVec3 {
        match self.positions.get(row).or(self.positions.last()) {
            Some(p) => *p,
            None => DVec3::ZERO,
        }
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn inline() -> &'static Path {
        Path::new("inline.txt")
    }

    #[test]
    fn test_parses_three_rows() {
        let positions = parse_trajectory(inline(), "1 2 3\n4 5 6\n7 8 9").unwrap();
        assert_eq!(
            positions,
            vec![
                DVec3::new(1.0, 2.0, 3.0),
                DVec3::new(4.0, 5.0, 6.0),
                DVec3::new(7.0, 8.0, 9.0),
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_trailing_newline_skipped() {
        let positions = parse_trajectory(inline(), "\n1 2 3\n\n  4\t5   6  \n").unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_scientific_notation() {
        let positions = parse_trajectory(inline(), "1.496e11 -2.5E-3 0").unwrap();
        assert_eq!(positions[0], DVec3::new(1.496e11, -2.5e-3, 0.0));
    }

    #[test]
    fn test_wrong_field_count_names_line() {
        let err = parse_trajectory(inline(), "1 2 3\n4 5\n").unwrap_err();
        match err {
            TrajectoryError::Parse { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "4 5");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            parse_trajectory(inline(), "1 2 3 4"),
            Err(TrajectoryError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let err = parse_trajectory(inline(), "1 2 3\n4 five 6").unwrap_err();
        assert_eq!(
            err.to_string(),
            "inline.txt:2: expected three numbers, found \"4 five 6\""
        );
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        for row in ["1 nan 3", "inf 0 0", "0 0 -infinity", "NaN NaN NaN"] {
            let text = format!("0 0 0\n{row}\n");
            assert!(
                matches!(
                    parse_trajectory(inline(), &text),
                    Err(TrajectoryError::Parse { line: 2, .. })
                ),
                "{row:?} accepted"
            );
        }
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(
            parse_trajectory(inline(), ""),
            Err(TrajectoryError::Empty { .. })
        ));
        assert!(matches!(
            parse_trajectory(inline(), "\n \n"),
            Err(TrajectoryError::Empty { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0 0").unwrap();
        writeln!(file, "1 0 0").unwrap();

        let trajectory = Trajectory::load(file.path()).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.position(1), DVec3::X);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Trajectory::load(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(TrajectoryError::Io { .. })));
    }

    #[test]
    fn test_position_holds_last_row() {
        let trajectory =
            Trajectory::from_positions(vec![DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)]);
        assert_eq!(trajectory.position(2), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(trajectory.position(500), DVec3::new(2.0, 0.0, 0.0));
    }
}
