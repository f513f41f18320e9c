//! Application context for dependency injection.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Roots every command works against.
///
/// The home directory and working directory are inputs here rather than
/// process globals, so tests can point commands at temporary trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    home_dir: PathBuf,
    project_root: PathBuf,
    package_root: PathBuf,
}

impl AppContext {
    /// Create a new context with explicit paths.
    pub fn new(home_dir: PathBuf, project_root: PathBuf, package_root: PathBuf) -> Self {
        Self {
            home_dir,
            project_root,
            package_root,
        }
    }

    /// Resolve the home directory and current directory from the process.
    ///
    /// `package_root` defaults to the current directory; a relative value is
    /// made absolute against it.
    pub fn with_defaults(package_root: Option<PathBuf>) -> anyhow::Result<Self> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        let project_root =
            std::env::current_dir().context("Could not determine current directory")?;
        let package_root = match package_root {
            Some(root) if root.is_absolute() => root,
            Some(root) => project_root.join(root),
            None => project_root.clone(),
        };

        Ok(Self::new(home_dir, project_root, package_root))
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }
}
