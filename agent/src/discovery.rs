//! Manifest discovery utilities
//!
//! Functions for discovering workload manifest files in directories.

use std::path::{Path, PathBuf};

/// Discover all workload manifests from an input path
///
/// If the path is a file, returns a vec containing just that file.
/// If the path is a directory, returns all .json files in it (non-recursive).
pub fn discover_workload_files(input_path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if input_path.is_file() {
        Ok(vec![input_path.to_path_buf()])
    } else if input_path.is_dir() {
        discover_in_directory(input_path)
    } else {
        Err(DiscoveryError::InvalidPath(input_path.to_path_buf()))
    }
}

/// Discover manifest files in a directory (non-recursive)
fn discover_in_directory(dir_path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut manifests = Vec::new();

    let entries = std::fs::read_dir(dir_path)
        .map_err(|e| DiscoveryError::ReadDir(dir_path.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::ReadEntry(dir_path.to_path_buf(), e))?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext == "json" {
                    manifests.push(path);
                }
            }
        }
    }

    manifests.sort();
    Ok(manifests)
}

/// Discover manifest files recursively in a directory
#[allow(dead_code)]
pub fn discover_workload_files_recursive(dir_path: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut manifests = Vec::new();
    discover_recursive_inner(dir_path, &mut manifests)?;
    manifests.sort();
    Ok(manifests)
}

#[allow(dead_code)]
fn discover_recursive_inner(
    dir_path: &Path,
    manifests: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let entries = std::fs::read_dir(dir_path)
        .map_err(|e| DiscoveryError::ReadDir(dir_path.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::ReadEntry(dir_path.to_path_buf(), e))?;
        let path = entry.path();

        if path.is_dir() {
            discover_recursive_inner(&path, manifests)?;
        } else if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext == "json" {
                    manifests.push(path);
                }
            }
        }
    }

    Ok(())
}

/// Errors that can occur during manifest discovery
#[derive(Debug)]
pub enum DiscoveryError {
    /// Path is neither a file nor a directory
    InvalidPath(PathBuf),
    /// Failed to read directory
    ReadDir(PathBuf, std::io::Error),
    /// Failed to read directory entry
    ReadEntry(PathBuf, std::io::Error),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
            DiscoveryError::ReadDir(p, e) => {
                write!(f, "Failed to read directory {}: {}", p.display(), e)
            }
            DiscoveryError::ReadEntry(p, e) => {
                write!(f, "Failed to read entry in {}: {}", p.display(), e)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::InvalidPath(_) => None,
            DiscoveryError::ReadDir(_, e) | DiscoveryError::ReadEntry(_, e) => Some(e),
        }
    }
}
