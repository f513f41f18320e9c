//! Skillkit Core Library
//!
//! Installs and uninstalls skill packages for agent runtimes: resolves the
//! install scope, clears stale install paths idempotently, and delegates
//! file placement to an external installer.

pub mod commands;
pub mod context;
pub mod deploy;
pub mod fs;
pub mod guide;
pub mod runtime;
pub mod skills;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::commands::{
        InstallCommand, InstallError, InstallOptions, InstallReport, UninstallCommand,
        UninstallOptions, UninstallReport,
    };
    pub use crate::context::AppContext;
    pub use crate::deploy::{SCOPE_ENV_VAR, ScopeRequest, resolve_scope};
    pub use crate::fs::{CleanupTarget, ReconcileReport, Reconciler, RemovalOutcome};
    pub use crate::skills::SkillLayout;
    pub use crate::types::Scope;
}
