use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DIRECTORY_PREFIX: &str = "directory";
const LAYER_FILE_PREFIX: &str = "up_to_layer";
const LAYER_FILE_EXTENSION: &str = "tsv";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed_dirs: usize,
    pub removed_files: usize,
    pub failures: usize,
}

/// Owns the working directory that receives per-layer interaction files.
#[derive(Debug)]
pub struct ArtifactManager {
    work_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.work_dir)?;
        debug!("Working directory ready at {:?}", self.work_dir);
        Ok(())
    }

    fn is_stale(path: &Path) -> Option<bool> {
        let name = path.file_name()?.to_str()?;
        if path.is_dir() {
            return Some(name.starts_with(DIRECTORY_PREFIX));
        }
        let is_layer_file = name.starts_with(LAYER_FILE_PREFIX)
            && path.extension().and_then(|ext| ext.to_str()) == Some(LAYER_FILE_EXTENSION);
        Some(path.is_file() && is_layer_file)
    }

    /// Removes `directory*` subdirectories and `up_to_layer*.tsv` files left
    /// by earlier runs. Individual failures are logged and counted.
    pub fn clean(&self) -> CleanupReport {
        let mut report = CleanupReport::default();
        let entries = match fs::read_dir(&self.work_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Nothing to clean in {:?}: {}", self.work_dir, e);
                return report;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if Self::is_stale(&path) != Some(true) {
                continue;
            }
            let (result, counter) = if path.is_dir() {
                (fs::remove_dir_all(&path), &mut report.removed_dirs)
            } else {
                (fs::remove_file(&path), &mut report.removed_files)
            };
            match result {
                Ok(()) => *counter += 1,
                Err(e) => {
                    warn!("Could not remove {:?}: {}", path, e);
                    report.failures += 1;
                }
            }
        }

        info!(
            "Removed {} director(ies) and {} file(s) from earlier runs in {:?}.",
            report.removed_dirs, report.removed_files, self.work_dir
        );
        report
    }
}
