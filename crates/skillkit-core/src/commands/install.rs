//! Install command implementation.
//!
//! Clears stale paths from earlier installs, then hands the package to the
//! external installer. Stale-path cleanup is scope-independent; only the
//! installer invocation depends on scope.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::context::AppContext;
use crate::fs::{FileSystem, RealFileSystem, ReconcileReport, Reconciler, TargetPreview};
use crate::guide::UsageGuide;
use crate::runtime::{CommandRunner, InstallerSpec, RunStatus, RunnerSpec, SystemRunner};
use crate::skills::{SkillLayout, resolve_skill_name};
use crate::types::Scope;

/// Options for the install command
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Resolved scope
    pub scope: Scope,
    /// Print the installer command without touching anything
    pub dry_run: bool,
    /// Skill name override; derived from the package when unset
    pub name: Option<String>,
    /// Installer to delegate to
    pub installer: InstallerSpec,
}

impl InstallOptions {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_installer(mut self, installer: InstallerSpec) -> Self {
        self.installer = installer;
        self
    }
}

/// Progress notifications, emitted in execution order.
#[derive(Debug)]
pub enum InstallEvent<'a> {
    /// The skill name is known; nothing has been touched yet.
    Resolved { name: &'a str, scope: Scope },
    /// Dry run: what the cleanup would touch.
    CleanupPlanned(&'a [TargetPreview]),
    /// Stale paths were swept.
    CleanupFinished(&'a ReconcileReport),
    /// The installer is about to take over the terminal.
    Launching(&'a RunnerSpec),
}

/// Report from a successful install or dry run
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub name: String,
    pub scope: Scope,
    pub dry_run: bool,
    /// The installer invocation (executed, or would-be for dry runs)
    pub command: RunnerSpec,
    /// Dry runs only: current state of each stale path
    pub planned_cleanup: Vec<TargetPreview>,
    /// Real runs only: stale-path sweep outcomes
    pub cleanup: ReconcileReport,
    /// Where the Claude Code integration will find the skill
    pub installed_to: Option<PathBuf>,
    pub status: Option<RunStatus>,
    pub guide: Option<UsageGuide>,
}

/// Fatal install failures
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to launch installer '{program}': {source}")]
    Launch {
        program: String,
        manual: String,
        #[source]
        source: std::io::Error,
    },

    #[error("installer exited unsuccessfully ({status})")]
    Failed { status: RunStatus, manual: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallError {
    /// Command the user can run by hand, when the failure came from the installer.
    pub fn manual_command(&self) -> Option<&str> {
        match self {
            InstallError::Launch { manual, .. } | InstallError::Failed { manual, .. } => {
                Some(manual)
            }
            InstallError::Other(_) => None,
        }
    }
}

/// Install command orchestrator
#[derive(Debug)]
pub struct InstallCommand<R = SystemRunner, F = RealFileSystem> {
    ctx: AppContext,
    runner: R,
    reconciler: Reconciler<F>,
}

impl InstallCommand {
    /// Create a new install command using the system installer and filesystem
    pub fn new(ctx: AppContext) -> Self {
        Self::with_parts(ctx, SystemRunner, RealFileSystem)
    }

    /// Create an install command with default paths
    pub fn with_defaults(package_root: Option<PathBuf>) -> anyhow::Result<Self> {
        Ok(Self::new(AppContext::with_defaults(package_root)?))
    }
}

impl<R: CommandRunner, F: FileSystem> InstallCommand<R, F> {
    pub fn with_parts(ctx: AppContext, runner: R, fs: F) -> Self {
        Self {
            ctx,
            runner,
            reconciler: Reconciler::new(fs),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Execute the install command
    pub fn execute(&self, options: &InstallOptions) -> Result<InstallReport, InstallError> {
        self.execute_with(options, |_| {})
    }

    /// Execute, reporting progress through `on_event` before the installer runs.
    pub fn execute_with(
        &self,
        options: &InstallOptions,
        mut on_event: impl FnMut(InstallEvent<'_>),
    ) -> Result<InstallReport, InstallError> {
        let package_root = self.ctx.package_root();
        let name = resolve_skill_name(package_root, options.name.as_deref())?;
        let layout = SkillLayout::from_context(&self.ctx, name.clone())?;
        let stale = layout.stale_targets();
        let command = options.installer.runner_spec(package_root, options.scope);
        on_event(InstallEvent::Resolved {
            name: &name,
            scope: options.scope,
        });

        if options.dry_run {
            let planned_cleanup = self.reconciler.preview(&stale);
            on_event(InstallEvent::CleanupPlanned(&planned_cleanup));
            return Ok(InstallReport {
                name,
                scope: options.scope,
                dry_run: true,
                command,
                planned_cleanup,
                cleanup: ReconcileReport::default(),
                installed_to: None,
                status: None,
                guide: None,
            });
        }

        let cleanup = self.reconciler.remove_all(&stale);
        on_event(InstallEvent::CleanupFinished(&cleanup));

        on_event(InstallEvent::Launching(&command));
        tracing::info!("Running installer: {}", command);
        let manual = command.display();
        let status = self
            .runner
            .run(&command)
            .map_err(|source| InstallError::Launch {
                program: command.command.clone(),
                manual: manual.clone(),
                source,
            })?;
        if !status.success() {
            return Err(InstallError::Failed { status, manual });
        }

        let guide = match UsageGuide::load(package_root, &name) {
            Ok(guide) => Some(guide),
            Err(err) => {
                tracing::warn!("Could not load usage guide: {:#}", err);
                None
            }
        };

        Ok(InstallReport {
            installed_to: Some(layout.claude_dir(options.scope)),
            name,
            scope: options.scope,
            dry_run: false,
            command,
            planned_cleanup: Vec::new(),
            cleanup,
            status: Some(status),
            guide,
        })
    }
}
