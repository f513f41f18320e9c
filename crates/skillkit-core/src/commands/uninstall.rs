//! Uninstall command implementation.
//!
//! Removes the scope-appropriate skill paths. Every target is attempted even
//! if an earlier one fails.

use std::path::PathBuf;

use serde::Serialize;

use crate::context::AppContext;
use crate::fs::{FileSystem, RealFileSystem, ReconcileReport, Reconciler};
use crate::skills::{SkillLayout, resolve_skill_name};
use crate::types::Scope;

/// Options for the uninstall command
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    /// Resolved scope
    pub scope: Scope,
    /// Skill name override; derived from the package when unset
    pub name: Option<String>,
}

impl UninstallOptions {
    pub fn new(scope: Scope) -> Self {
        Self { scope, name: None }
    }

    /// Set the skill name explicitly
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Report from an uninstall operation
#[derive(Debug, Clone, Serialize)]
pub struct UninstallReport {
    /// Skill name
    pub name: String,
    /// Scope the targets were selected for
    pub scope: Scope,
    /// One outcome per target, in order
    pub cleanup: ReconcileReport,
}

impl UninstallReport {
    pub fn removed_count(&self) -> usize {
        self.cleanup.removed_count()
    }

    pub fn error_count(&self) -> usize {
        self.cleanup.error_count()
    }

    /// Nothing existed and nothing failed.
    pub fn nothing_to_remove(&self) -> bool {
        self.removed_count() == 0 && self.error_count() == 0
    }

    /// `0` when every target succeeded (removed or absent), `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.cleanup.is_success() { 0 } else { 1 }
    }
}

/// Uninstall command orchestrator
#[derive(Debug)]
pub struct UninstallCommand<F = RealFileSystem> {
    ctx: AppContext,
    reconciler: Reconciler<F>,
}

impl UninstallCommand {
    /// Create a new uninstall command against the real filesystem
    pub fn new(ctx: AppContext) -> Self {
        Self::with_filesystem(ctx, RealFileSystem)
    }

    /// Create an uninstall command with default paths
    pub fn with_defaults(package_root: Option<PathBuf>) -> anyhow::Result<Self> {
        Ok(Self::new(AppContext::with_defaults(package_root)?))
    }
}

impl<F: FileSystem> UninstallCommand<F> {
    pub fn with_filesystem(ctx: AppContext, fs: F) -> Self {
        Self {
            ctx,
            reconciler: Reconciler::new(fs),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Execute the uninstall command.
    ///
    /// Removal failures are reported in the returned report, not as `Err`.
    /// `Err` is reserved for problems before any path is touched, such as an
    /// unusable skill name.
    pub fn execute(&self, options: &UninstallOptions) -> anyhow::Result<UninstallReport> {
        let name = resolve_skill_name(self.ctx.package_root(), options.name.as_deref())?;
        let layout = SkillLayout::from_context(&self.ctx, name.clone())?;
        let targets = layout.uninstall_targets(options.scope);

        tracing::debug!(
            "Uninstalling '{}' ({}) from {} target(s)",
            name,
            options.scope,
            targets.len()
        );
        let cleanup = self.reconciler.remove_all(&targets);

        Ok(UninstallReport {
            name,
            scope: options.scope,
            cleanup,
        })
    }
}
