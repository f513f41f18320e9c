//! Filesystem primitives shared across features.
//!
//! All probes are non-following: a symlink is classified and removed as a
//! link, never through its target.

pub mod reconcile;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub use reconcile::{
    CleanupTarget, ReconcileReport, Reconciler, RemovalOutcome, RemovalStatus, TargetPreview,
};

/// What a path turned out to be when probed without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Symlink,
    Directory,
    File,
}

impl PathKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PathKind::Symlink => "symlink",
            PathKind::Directory => "directory",
            PathKind::File => "file",
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified filesystem failure.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("no such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => FsError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

/// The operations the reconciler needs from a filesystem.
pub trait FileSystem {
    /// Classify `path` without following symlinks. `Ok(None)` when absent.
    fn probe(&self, path: &Path) -> Result<Option<PathKind>, FsError>;

    /// Remove `path`, which was last seen as `kind`.
    fn remove(&self, path: &Path, kind: PathKind) -> Result<(), FsError>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn probe(&self, path: &Path) -> Result<Option<PathKind>, FsError> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(err) if is_absent(&err) => return Ok(None),
            Err(err) => return Err(FsError::from_io(path, err)),
        };

        let ty = meta.file_type();
        let kind = if ty.is_symlink() {
            PathKind::Symlink
        } else if ty.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        };
        Ok(Some(kind))
    }

    fn remove(&self, path: &Path, kind: PathKind) -> Result<(), FsError> {
        let result = match kind {
            PathKind::Symlink => remove_symlink(path),
            PathKind::Directory => std::fs::remove_dir_all(path),
            PathKind::File => std::fs::remove_file(path),
        };
        result.map_err(|err| FsError::from_io(path, err))
    }
}

/// A missing path, or one whose parent is not a directory, cannot exist.
fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

#[cfg(not(windows))]
fn remove_symlink(path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
}

// Directory symlinks and junctions need remove_dir on Windows.
#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path))
}
