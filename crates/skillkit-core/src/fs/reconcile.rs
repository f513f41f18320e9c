//! Idempotent removal of installation paths.
//!
//! Every target yields exactly one [`RemovalOutcome`], in target order. A
//! target that is already gone, or vanishes between the probe and the
//! removal, is a success with `removed == false`. Only unexpected failures
//! set `success == false`, and they never stop the remaining targets.

use std::path::PathBuf;

use serde::Serialize;

use super::{FileSystem, FsError, PathKind, RealFileSystem};

/// A path to clean up plus a label for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupTarget {
    pub path: PathBuf,
    pub description: String,
}

impl CleanupTarget {
    pub fn new(path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemovalStatus {
    /// The path existed and was removed.
    Removed { kind: PathKind },
    /// Nothing was at the path when probed.
    NotFound,
    /// The path disappeared between the probe and the removal.
    AlreadyRemoved,
    /// Probe or removal failed for a reason other than absence.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalOutcome {
    pub path: PathBuf,
    pub description: String,
    pub status: RemovalStatus,
    pub success: bool,
    pub removed: bool,
    pub message: String,
}

impl RemovalOutcome {
    fn removed(target: &CleanupTarget, kind: PathKind) -> Self {
        Self {
            path: target.path.clone(),
            description: target.description.clone(),
            status: RemovalStatus::Removed { kind },
            success: true,
            removed: true,
            message: format!("removed {}", kind),
        }
    }

    fn not_found(target: &CleanupTarget) -> Self {
        Self {
            path: target.path.clone(),
            description: target.description.clone(),
            status: RemovalStatus::NotFound,
            success: true,
            removed: false,
            message: "not found".to_string(),
        }
    }

    fn already_removed(target: &CleanupTarget) -> Self {
        Self {
            path: target.path.clone(),
            description: target.description.clone(),
            status: RemovalStatus::AlreadyRemoved,
            success: true,
            removed: false,
            message: "already removed".to_string(),
        }
    }

    fn failed(target: &CleanupTarget, err: &FsError) -> Self {
        Self {
            path: target.path.clone(),
            description: target.description.clone(),
            status: RemovalStatus::Failed,
            success: false,
            removed: false,
            message: err.to_string(),
        }
    }
}

/// Aggregate of one sweep over a target list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub outcomes: Vec<RemovalOutcome>,
}

impl ReconcileReport {
    pub fn removed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.removed).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// What currently sits at a target, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetPreview {
    pub path: PathBuf,
    pub description: String,
    pub kind: Option<PathKind>,
    pub error: Option<String>,
}

/// Removes cleanup targets through a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct Reconciler<F = RealFileSystem> {
    fs: F,
}

impl<F: FileSystem> Reconciler<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Remove a single target. Never panics and never returns an error;
    /// failures are reported through the outcome.
    pub fn remove_one(&self, target: &CleanupTarget) -> RemovalOutcome {
        let path = target.path.as_path();

        let kind = match self.fs.probe(path) {
            Ok(Some(kind)) => kind,
            Ok(None) => {
                tracing::debug!(
                    "Skip {} ({}): not found",
                    target.description,
                    path.display()
                );
                return RemovalOutcome::not_found(target);
            }
            Err(err) => return self.failure(target, &err),
        };

        match self.fs.remove(path, kind) {
            Ok(()) => {
                tracing::debug!(
                    "Removed {} {} ({})",
                    kind,
                    target.description,
                    path.display()
                );
                RemovalOutcome::removed(target, kind)
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(
                    "{} ({}) vanished before removal",
                    target.description,
                    path.display()
                );
                RemovalOutcome::already_removed(target)
            }
            Err(err) => self.failure(target, &err),
        }
    }

    /// Remove every target in order. A failing target does not stop the sweep.
    pub fn remove_all(&self, targets: &[CleanupTarget]) -> ReconcileReport {
        let outcomes = targets.iter().map(|t| self.remove_one(t)).collect();
        ReconcileReport { outcomes }
    }

    /// Probe every target without touching it.
    pub fn preview(&self, targets: &[CleanupTarget]) -> Vec<TargetPreview> {
        targets
            .iter()
            .map(|target| {
                let (kind, error) = match self.fs.probe(&target.path) {
                    Ok(kind) => (kind, None),
                    Err(err) => (None, Some(err.to_string())),
                };
                TargetPreview {
                    path: target.path.clone(),
                    description: target.description.clone(),
                    kind,
                    error,
                }
            })
            .collect()
    }

    fn failure(&self, target: &CleanupTarget, err: &FsError) -> RemovalOutcome {
        tracing::warn!(
            "Failed to remove {} ({}): {}",
            target.description,
            target.path.display(),
            err
        );
        RemovalOutcome::failed(target, err)
    }
}
