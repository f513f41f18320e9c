//! Human-readable progress and report output.
//!
//! Every line starts with a status marker: `✓` done, `⊗` skipped,
//! `⚠` warning, `✗` error.

use std::io::{self, Write};

use console::style;

use skillkit_core::commands::{InstallError, InstallReport, UninstallReport};
use skillkit_core::fs::{ReconcileReport, RemovalOutcome, TargetPreview};
use skillkit_core::runtime::RunnerSpec;
use skillkit_core::types::Scope;

#[derive(Debug, Clone, Copy)]
enum Level {
    Success,
    Skip,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> String {
        match self {
            Level::Success => style("✓").green().to_string(),
            Level::Skip => style("⊗").dim().to_string(),
            Level::Warning => style("⚠").yellow().to_string(),
            Level::Error => style("✗").red().to_string(),
        }
    }
}

/// Writes progress lines for the table output format.
pub struct Printer<W: Write = io::Stdout> {
    writer: W,
}

impl Printer {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, level: Level, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.writer, "{} {}", level.marker(), message.as_ref())
    }

    fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    pub fn start(&mut self, action: &str, name: &str, scope: Scope) -> io::Result<()> {
        self.line(Level::Success, format!("{} {}...", action, name))?;
        self.line(Level::Success, format!("Scope: {}", scope.label()))
    }

    fn outcome(&mut self, outcome: &RemovalOutcome) -> io::Result<()> {
        let text = format!(
            "{}: {} ({})",
            outcome.description,
            outcome.message,
            outcome.path.display()
        );
        if outcome.removed {
            self.line(Level::Success, format!("  {}", text))
        } else if outcome.success {
            self.line(Level::Skip, format!("  {} (skipped)", text))
        } else {
            self.line(Level::Error, format!("  {}", text))
        }
    }

    pub fn cleanup(&mut self, report: &ReconcileReport) -> io::Result<()> {
        self.blank()?;
        self.line(Level::Success, "Cleaning up previous installation files...")?;
        for outcome in &report.outcomes {
            self.outcome(outcome)?;
        }

        let removed = report.removed_count();
        if removed > 0 {
            self.line(
                Level::Success,
                format!("Cleaned up {} previous installation file(s)", removed),
            )?;
        } else {
            self.line(Level::Success, "No previous installation files found")?;
        }
        if report.error_count() > 0 {
            self.line(
                Level::Warning,
                format!(
                    "{} path(s) could not be removed; continuing",
                    report.error_count()
                ),
            )?;
        }
        Ok(())
    }

    pub fn planned_cleanup(&mut self, previews: &[TargetPreview]) -> io::Result<()> {
        self.blank()?;
        self.line(Level::Warning, "[DRY-RUN] Would clean up:")?;
        for preview in previews {
            let state = match (&preview.kind, &preview.error) {
                (Some(kind), _) => kind.to_string(),
                (None, Some(err)) => format!("unreadable: {}", err),
                (None, None) => "not found".to_string(),
            };
            writeln!(
                self.writer,
                "  • {}: {} ({})",
                preview.description,
                state,
                preview.path.display()
            )?;
        }
        Ok(())
    }

    pub fn launching(&mut self, _command: &RunnerSpec) -> io::Result<()> {
        self.blank()?;
        self.line(Level::Success, "Running skills add...")?;
        self.writer.flush()
    }

    pub fn install_result(&mut self, report: &InstallReport) -> io::Result<()> {
        if report.dry_run {
            self.blank()?;
            self.line(Level::Warning, "[DRY-RUN] Command to be executed:")?;
            writeln!(self.writer, "  {}", report.command)?;
            self.blank()?;
            return self.line(
                Level::Success,
                "Dry run passed - run again without --dry-run to install",
            );
        }

        self.blank()?;
        self.line(Level::Success, "Installation succeeded!")?;
        if let Some(path) = &report.installed_to {
            self.line(
                Level::Success,
                format!("Skill installed to: {}", path.display()),
            )?;
        }
        if let Some(guide) = &report.guide {
            self.blank()?;
            writeln!(self.writer, "{}", guide.render())?;
        }
        Ok(())
    }

    pub fn install_error(&mut self, err: &InstallError) -> io::Result<()> {
        self.line(Level::Error, format!("Installation failed: {:#}", err))?;
        if let Some(manual) = err.manual_command() {
            self.blank()?;
            self.line(Level::Warning, "You can try installing manually:")?;
            writeln!(self.writer, "  {}", manual)?;
        }
        Ok(())
    }

    pub fn uninstall_result(&mut self, report: &UninstallReport) -> io::Result<()> {
        self.blank()?;
        self.line(Level::Success, "Removing skill files...")?;
        for outcome in &report.cleanup.outcomes {
            self.outcome(outcome)?;
        }

        self.blank()?;
        let removed = report.removed_count();
        let errors = report.error_count();
        if removed > 0 {
            self.line(
                Level::Success,
                format!("Uninstalled! Removed {} file(s)/directories", removed),
            )?;
        } else if errors == 0 {
            self.line(Level::Skip, "Nothing to remove")?;
        }
        if errors > 0 {
            self.line(
                Level::Warning,
                format!(
                    "{} path(s) could not be removed, please clean up manually",
                    errors
                ),
            )?;
        }
        Ok(())
    }

    pub fn error(&mut self, context: &str, err: &anyhow::Error) -> io::Result<()> {
        self.line(Level::Error, format!("{}: {:#}", context, err))
    }
}
