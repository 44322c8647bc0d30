//! Startup load phase: one worker thread per trajectory file.
//!
//! Workers report `(index, result)` over a bounded channel and results are
//! stored by index, so completion order never affects which body gets which
//! table. The phase returns only after every worker has reported.

use std::fmt;
use std::path::PathBuf;

use crossbeam_channel::bounded;
use tracing::{debug, error, info};

use crate::trajectory::{Trajectory, TrajectoryError};

/// One file that failed to load.
#[derive(Debug)]
pub struct FileFailure {
    /// Body index the file belongs to.
    pub index: usize,
    pub error: TrajectoryError,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body {}: {}", self.index, self.error)
    }
}

/// Every failure from a load phase, in body order.
#[derive(Debug, thiserror::Error)]
#[error("{count} of {total} trajectory files failed to load", count = .failures.len())]
pub struct LoadError {
    pub total: usize,
    pub failures: Vec<FileFailure>,
}

/// Load every file concurrently and return the tables in the order of `paths`.
pub fn load_trajectories(paths: &[PathBuf]) -> Result<Vec<Trajectory>, LoadError> {
    let total = paths.len();
    let (sender, receiver) = bounded::<(usize, Result<Trajectory, TrajectoryError>)>(total.max(1));
    let mut slots: Vec<Option<Result<Trajectory, TrajectoryError>>> =
        (0..total).map(|_| None).collect();

    let mut handles = Vec::with_capacity(total);
    for (index, path) in paths.iter().enumerate() {
        let sender = sender.clone();
        let worker_path = path.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("trajectory-loader-{index}"))
            .spawn(move || {
                let result = Trajectory::load(&worker_path);
                let _ = sender.send((index, result));
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                slots[index] = Some(Err(TrajectoryError::Io {
                    path: path.clone(),
                    source,
                }));
            }
        }
    }
    drop(sender);

    // Ends once every worker has sent and dropped its sender.
    for (index, result) in receiver.iter() {
        slots[index] = Some(result);
    }
    for handle in handles {
        let _ = handle.join();
    }

    let mut trajectories = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (index, slot) in slots.into_iter().enumerate() {
        let result = slot.unwrap_or_else(|| {
            Err(TrajectoryError::WorkerLost {
                path: paths[index].clone(),
            })
        });
        match result {
            Ok(trajectory) => {
                debug!(
                    "Loaded {} ({} rows)",
                    paths[index].display(),
                    trajectory.len()
                );
                trajectories.push(trajectory);
            }
            Err(error) => failures.push(FileFailure { index, error }),
        }
    }

    if failures.is_empty() {
        info!("Loaded {} trajectory files", total);
        Ok(trajectories)
    } else {
        for failure in &failures {
            error!("{failure}");
        }
        Err(LoadError { total, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use std::path::Path;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_results_keep_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                // Larger files for lower indices so completion order differs.
                let rows = (0..(8 - i) * 500)
                    .map(|_| format!("{i} 0 0"))
                    .collect::<Vec<_>>()
                    .join("\n");
                write(dir.path(), &format!("body_num_{i}.txt"), &rows)
            })
            .collect();

        let trajectories = load_trajectories(&paths).unwrap();
        assert_eq!(trajectories.len(), 8);
        for (i, trajectory) in trajectories.iter().enumerate() {
            assert_eq!(trajectory.position(0), DVec3::new(i as f64, 0.0, 0.0));
            assert_eq!(trajectory.len(), (8 - i) * 500);
        }
    }

    #[test]
    fn test_failure_reports_its_index() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write(dir.path(), "a.txt", "0 0 0\n"),
            write(dir.path(), "b.txt", "1 2\n"),
            write(dir.path(), "c.txt", "2 0 0\n"),
        ];

        let err = load_trajectories(&paths).unwrap_err();
        assert_eq!(err.total, 3);
        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].index, 1);
        assert!(matches!(
            err.failures[0].error,
            TrajectoryError::Parse { line: 1, .. }
        ));
        assert_eq!(err.to_string(), "1 of 3 trajectory files failed to load");
    }

    #[test]
    fn test_every_failure_is_collected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            dir.path().join("missing.txt"),
            write(dir.path(), "ok.txt", "0 0 0\n"),
            write(dir.path(), "empty.txt", ""),
        ];

        let err = load_trajectories(&paths).unwrap_err();
        let indices: Vec<usize> = err.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(matches!(err.failures[0].error, TrajectoryError::Io { .. }));
        assert!(matches!(err.failures[1].error, TrajectoryError::Empty { .. }));
    }

    #[test]
    fn test_no_paths_loads_nothing() {
        assert!(load_trajectories(&[]).unwrap().is_empty());
    }
}
