//! Skillkit - skill package installer
//!
//! Usage:
//!   skillkit install [--dry-run] [--global|--local]
//!   skillkit uninstall [--global|--local]
//!
//! Without a scope flag, `SKILL_SCOPE` (GLOBAL or LOCAL) decides; the
//! default is GLOBAL.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skillkit_core::commands::{
    InstallCommand, InstallEvent, InstallOptions, UninstallCommand, UninstallOptions,
};
use skillkit_core::deploy::{SCOPE_ENV_VAR, ScopeRequest, resolve_scope};
use skillkit_core::types::Scope;

use crate::output::Printer;

#[derive(Parser)]
#[command(name = "skillkit")]
#[command(about = "Install and uninstall agent skill packages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean up stale copies, then install through `npx skills add`
    Install(InstallArgs),

    /// Remove the skill's canonical copy and Claude Code entry
    #[command(alias = "rm")]
    Uninstall(UninstallArgs),
}

#[derive(Args)]
struct ScopeArgs {
    /// Force global (home directory) scope; wins over --local
    #[arg(long)]
    global: bool,

    /// Force project-level (current directory) scope
    #[arg(long)]
    local: bool,
}

impl ScopeArgs {
    fn resolve(&self) -> Scope {
        let env_value = std::env::var(SCOPE_ENV_VAR).ok();
        resolve_scope(
            ScopeRequest::new(self.global, self.local),
            env_value.as_deref(),
        )
    }
}

#[derive(Args)]
struct PackageArgs {
    /// Skill package directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    package_root: Option<PathBuf>,

    /// Skill name (defaults to the package.json name without its npm scope)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct InstallArgs {
    /// Print the installer command without changing anything
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    scope: ScopeArgs,

    #[command(flatten)]
    package: PackageArgs,

    /// Output format
    #[arg(short = 'o', long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Args)]
struct UninstallArgs {
    #[command(flatten)]
    scope: ScopeArgs,

    #[command(flatten)]
    package: PackageArgs,

    /// Output format
    #[arg(short = 'o', long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, Debug)]
enum OutputFormat {
    /// Human-readable progress
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run_cli(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{:#}", err);
            let _ = Printer::stdout().error("Unexpected error", &err);
            ExitCode::from(1)
        }
    }
}

fn run_cli(command: Commands) -> Result<u8> {
    match command {
        Commands::Install(args) => run_install(args),
        Commands::Uninstall(args) => run_uninstall(args),
    }
}

fn run_install(args: InstallArgs) -> Result<u8> {
    let scope = args.scope.resolve();
    let cmd = InstallCommand::with_defaults(args.package.package_root)?;
    let mut options = InstallOptions::new(scope).with_dry_run(args.dry_run);
    if let Some(name) = &args.package.name {
        options = options.with_name(name);
    }

    if args.format == OutputFormat::Json {
        return match cmd.execute(&options) {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                Ok(0)
            }
            Err(err) => {
                let output = serde_json::json!({
                    "error": format!("{:#}", err),
                    "manual_command": err.manual_command(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(1)
            }
        };
    }

    let mut printer = Printer::stdout();
    let mut write_err = None;
    let result = cmd.execute_with(&options, |event| {
        let written = match event {
            InstallEvent::Resolved { name, scope } => printer.start("Installing", name, scope),
            InstallEvent::CleanupPlanned(previews) => printer.planned_cleanup(previews),
            InstallEvent::CleanupFinished(report) => printer.cleanup(report),
            InstallEvent::Launching(command) => printer.launching(command),
        };
        if let Err(err) = written {
            write_err.get_or_insert(err);
        }
    });
    if let Some(err) = write_err {
        return Err(err.into());
    }

    match result {
        Ok(report) => {
            printer.install_result(&report)?;
            Ok(0)
        }
        Err(err) => {
            printer.install_error(&err)?;
            Ok(1)
        }
    }
}

fn run_uninstall(args: UninstallArgs) -> Result<u8> {
    let scope = args.scope.resolve();
    let mut options = UninstallOptions::new(scope);
    if let Some(name) = &args.package.name {
        options = options.with_name(name);
    }

    let cmd = UninstallCommand::with_defaults(args.package.package_root)?;
    let report = cmd.execute(&options)?;

    match args.format {
        OutputFormat::Table => {
            let mut printer = Printer::stdout();
            printer.start("Uninstalling", &report.name, report.scope)?;
            printer.uninstall_result(&report)?;
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": report.name,
                "scope": report.scope,
                "removed_count": report.removed_count(),
                "error_count": report.error_count(),
                "outcomes": report.cleanup.outcomes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(report.exit_code())
}
