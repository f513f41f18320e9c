//! High-level commands for skillkit operations.
//!
//! These are the entry points the CLI calls; each owns an [`AppContext`]
//! and returns a serializable report.
//!
//! [`AppContext`]: crate::context::AppContext

pub mod install;
pub mod uninstall;

pub use install::{InstallCommand, InstallError, InstallEvent, InstallOptions, InstallReport};
pub use uninstall::{UninstallCommand, UninstallOptions, UninstallReport};
