//! Integration tests for the uninstall command

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use skillkit_core::commands::{UninstallCommand, UninstallOptions};
use skillkit_core::context::AppContext;
use skillkit_core::fs::{FileSystem, FsError, PathKind, RealFileSystem, RemovalStatus};
use skillkit_core::types::Scope;

struct Roots {
    _temp: TempDir,
    home: PathBuf,
    project: PathBuf,
    package: PathBuf,
}

fn setup_roots() -> Roots {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let home = temp.path().join("home");
    let project = temp.path().join("project");
    let package = temp.path().join("packages").join("foo");

    std::fs::create_dir_all(&home).expect("Failed to create home dir");
    std::fs::create_dir_all(&project).expect("Failed to create project dir");
    std::fs::create_dir_all(&package).expect("Failed to create package dir");

    Roots {
        _temp: temp,
        home,
        project,
        package,
    }
}

fn command(roots: &Roots) -> UninstallCommand {
    UninstallCommand::new(AppContext::new(
        roots.home.clone(),
        roots.project.clone(),
        roots.package.clone(),
    ))
}

fn write_skill_dir(dir: &Path) {
    std::fs::create_dir_all(dir).expect("Failed to create skill dir");
    std::fs::write(
        dir.join("SKILL.md"),
        "---\nname: foo\ndescription: Test skill\n---\n",
    )
    .expect("Failed to write SKILL.md");
}

#[cfg(unix)]
#[test]
fn global_uninstall_removes_canonical_copy_and_link() {
    let roots = setup_roots();
    let canonical = roots.home.join(".agents/skills/foo");
    let link = roots.home.join(".claude/skills/foo");
    write_skill_dir(&canonical);
    std::fs::create_dir_all(link.parent().expect("link parent")).expect("create .claude/skills");
    std::os::unix::fs::symlink(&canonical, &link).expect("Failed to create skill link");

    let report = command(&roots)
        .execute(&UninstallOptions::new(Scope::Global))
        .expect("uninstall");

    assert_eq!(report.name, "foo");
    assert_eq!(report.removed_count(), 2);
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.exit_code(), 0);
    assert!(!canonical.exists());
    assert!(std::fs::symlink_metadata(&link).is_err());
}

#[test]
fn uninstall_with_nothing_installed_succeeds() {
    let roots = setup_roots();

    let report = command(&roots)
        .execute(&UninstallOptions::new(Scope::Global))
        .expect("uninstall");

    assert!(report.nothing_to_remove());
    assert_eq!(report.exit_code(), 0);
    assert!(
        report
            .cleanup
            .outcomes
            .iter()
            .all(|o| o.status == RemovalStatus::NotFound)
    );
}

#[test]
fn local_uninstall_leaves_global_install_alone() {
    let roots = setup_roots();
    let global_canonical = roots.home.join(".agents/skills/foo");
    let global_claude = roots.home.join(".claude/skills/foo");
    let local_canonical = roots.project.join(".agents/skills/foo");
    let local_claude = roots.project.join(".claude/skills/foo");
    for dir in [
        &global_canonical,
        &global_claude,
        &local_canonical,
        &local_claude,
    ] {
        write_skill_dir(dir);
    }

    let report = command(&roots)
        .execute(&UninstallOptions::new(Scope::Local))
        .expect("uninstall");

    assert_eq!(report.removed_count(), 2);
    assert!(!local_canonical.exists());
    assert!(!local_claude.exists());
    assert!(global_canonical.exists());
    assert!(global_claude.exists());
}

#[test]
fn skill_name_comes_from_package_json() {
    let roots = setup_roots();
    std::fs::write(
        roots.package.join("package.json"),
        r#"{"name":"@acme/hello-world","description":"Says hello"}"#,
    )
    .expect("write package.json");
    let canonical = roots.home.join(".agents/skills/hello-world");
    write_skill_dir(&canonical);

    let report = command(&roots)
        .execute(&UninstallOptions::new(Scope::Global))
        .expect("uninstall");

    assert_eq!(report.name, "hello-world");
    assert_eq!(report.removed_count(), 1);
    assert!(!canonical.exists());
}

#[test]
fn explicit_name_with_traversal_is_rejected_before_touching_disk() {
    let roots = setup_roots();
    let skills = roots.home.join(".agents/skills");
    write_skill_dir(&skills.join("other"));

    let err = command(&roots)
        .execute(&UninstallOptions::new(Scope::Global).with_name(".."))
        .expect_err("traversal name should fail");

    assert!(err.to_string().contains("Invalid skill name"));
    assert!(skills.join("other").exists());
}

#[cfg(unix)]
#[test]
fn uninstall_with_file_in_place_of_parent_dir_succeeds() {
    let roots = setup_roots();
    std::fs::write(roots.home.join(".agents"), "stray file").expect("write stray file");

    let report = command(&roots)
        .execute(&UninstallOptions::new(Scope::Global))
        .expect("uninstall");

    assert!(report.nothing_to_remove());
    assert_eq!(report.exit_code(), 0);
}

/// Refuses to remove anything under the denied root.
struct DenyingFs {
    denied: PathBuf,
}

impl FileSystem for DenyingFs {
    fn probe(&self, path: &Path) -> Result<Option<PathKind>, FsError> {
        RealFileSystem.probe(path)
    }

    fn remove(&self, path: &Path, kind: PathKind) -> Result<(), FsError> {
        if path.starts_with(&self.denied) {
            return Err(FsError::from_io(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        RealFileSystem.remove(path, kind)
    }
}

#[test]
fn removal_failure_is_reported_and_exits_one() {
    let roots = setup_roots();
    let canonical = roots.home.join(".agents/skills/foo");
    let claude = roots.home.join(".claude/skills/foo");
    write_skill_dir(&canonical);
    write_skill_dir(&claude);

    let cmd = UninstallCommand::with_filesystem(
        AppContext::new(
            roots.home.clone(),
            roots.project.clone(),
            roots.package.clone(),
        ),
        DenyingFs {
            denied: roots.home.join(".agents"),
        },
    );
    let report = cmd
        .execute(&UninstallOptions::new(Scope::Global))
        .expect("removal failures are reported, not returned");

    assert_eq!(report.cleanup.outcomes.len(), 2);
    assert_eq!(report.cleanup.outcomes[0].status, RemovalStatus::Failed);
    assert!(report.cleanup.outcomes[0].message.contains("permission denied"));
    assert!(report.cleanup.outcomes[1].removed);
    assert_eq!(report.removed_count(), 1);
    assert_eq!(report.error_count(), 1);
    assert!(!report.nothing_to_remove());
    assert_eq!(report.exit_code(), 1);
    assert!(canonical.exists());
    assert!(!claude.exists());
}
