//! External installer invocation.
//!
//! The installer is described as a [`RunnerSpec`] and executed through a
//! [`CommandRunner`]. [`SystemRunner`] blocks until the child exits and lets
//! it share this process's stdin/stdout/stderr, so its output interleaves
//! with ours in order. There is no timeout or cancellation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::types::Scope;

#[cfg(windows)]
const DEFAULT_PROGRAM: &str = "npx.cmd";
#[cfg(not(windows))]
const DEFAULT_PROGRAM: &str = "npx";

/// Which installer to call and the arguments that precede the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerSpec {
    pub program: String,
    pub leading_args: Vec<String>,
}

impl Default for InstallerSpec {
    /// `npx -y skills add`
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            leading_args: vec!["-y".to_string(), "skills".to_string(), "add".to_string()],
        }
    }
}

impl InstallerSpec {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// `<program> <leading_args..> <package_root> [-g] -y`, run from `package_root`.
    pub fn runner_spec(&self, package_root: &Path, scope: Scope) -> RunnerSpec {
        let mut args = self.leading_args.clone();
        args.push(package_root.to_string_lossy().to_string());
        if scope.is_global() {
            args.push("-g".to_string());
        }
        args.push("-y".to_string());

        RunnerSpec {
            command: self.program.clone(),
            args,
            cwd: Some(package_root.to_path_buf()),
        }
    }
}

/// Executable specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerSpec {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl RunnerSpec {
    /// Shell-style rendering, suitable for copy-paste.
    pub fn display(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RunnerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@=+,~".contains(c));
    if plain {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// How a finished child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Runs a [`RunnerSpec`] to completion.
pub trait CommandRunner {
    fn run(&self, spec: &RunnerSpec) -> std::io::Result<RunStatus>;
}

/// [`CommandRunner`] backed by `std::process::Command` with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &RunnerSpec) -> std::io::Result<RunStatus> {
        let mut cmd = Command::new(&spec.command);
        cmd.args(&spec.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        let status = cmd.status()?;
        Ok(RunStatus {
            code: status.code(),
        })
    }
}
