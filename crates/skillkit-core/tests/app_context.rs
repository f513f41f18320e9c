use std::path::PathBuf;

use skillkit_core::context::AppContext;
use skillkit_core::skills::SkillLayout;
use skillkit_core::types::Scope;
use tempfile::TempDir;

#[test]
fn app_context_creates_from_paths() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let home = temp.path().join("home");
    let project = temp.path().join("project");
    let package = temp.path().join("package");

    let ctx = AppContext::new(home.clone(), project.clone(), package.clone());

    assert_eq!(ctx.home_dir(), home.as_path());
    assert_eq!(ctx.project_root(), project.as_path());
    assert_eq!(ctx.package_root(), package.as_path());
}

#[test]
fn app_context_defaults_package_root_to_current_dir() {
    let ctx = AppContext::with_defaults(None).expect("defaults should resolve");
    let cwd = std::env::current_dir().expect("current dir");

    assert_eq!(ctx.project_root(), cwd.as_path());
    assert_eq!(ctx.package_root(), cwd.as_path());
}

#[test]
fn app_context_joins_relative_package_root() {
    let ctx = AppContext::with_defaults(Some(PathBuf::from("skills/hello")))
        .expect("defaults should resolve");
    let cwd = std::env::current_dir().expect("current dir");

    assert_eq!(ctx.package_root(), cwd.join("skills/hello").as_path());
}

#[test]
fn skill_layout_roots_follow_context() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let home = temp.path().join("home");
    let project = temp.path().join("project");
    let ctx = AppContext::new(home.clone(), project.clone(), temp.path().join("pkg"));

    let layout = SkillLayout::from_context(&ctx, "hello").expect("valid name");

    assert_eq!(layout.canonical_dir(Scope::Global), home.join(".agents/skills/hello"));
    assert_eq!(layout.claude_dir(Scope::Global), home.join(".claude/skills/hello"));
    assert_eq!(layout.claude_dir(Scope::Local), project.join(".claude/skills/hello"));
}
