//! Skill install locations.
//!
//! A skill lives in two places per root: the canonical copy maintained by
//! the external installer (`<root>/.agents/skills/<name>`) and the copy or
//! link the Claude Code integration reads (`<root>/.claude/skills/<name>`).
//! The root is the home directory for [`Scope::Global`] and the project
//! directory for [`Scope::Local`].

pub mod package;

use std::path::{Component, Path, PathBuf};

pub use package::{PackageInfo, resolve_skill_name, skill_description, strip_npm_scope};

use crate::context::AppContext;
use crate::fs::CleanupTarget;
use crate::types::Scope;

pub const AGENTS_DIR: &str = ".agents";
pub const CLAUDE_DIR: &str = ".claude";
pub const SKILLS_DIR: &str = "skills";

/// Reject names that are not a single plain path component.
///
/// The name is joined onto directories that get recursively deleted, so
/// separators, `.`/`..` and absolute paths are never allowed.
pub fn validate_skill_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Skill name must not be empty");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => anyhow::bail!(
            "Invalid skill name '{}': must be a single directory name",
            name
        ),
    }
}

/// Resolves every managed path for one skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLayout {
    home_dir: PathBuf,
    project_root: PathBuf,
    name: String,
}

impl SkillLayout {
    pub fn new(
        home_dir: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        validate_skill_name(&name)?;
        Ok(Self {
            home_dir: home_dir.into(),
            project_root: project_root.into(),
            name,
        })
    }

    pub fn from_context(ctx: &AppContext, name: impl Into<String>) -> anyhow::Result<Self> {
        Self::new(ctx.home_dir(), ctx.project_root(), name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Global => &self.home_dir,
            Scope::Local => &self.project_root,
        }
    }

    /// `<root>/.agents/skills/<name>`
    pub fn canonical_dir(&self, scope: Scope) -> PathBuf {
        self.root(scope)
            .join(AGENTS_DIR)
            .join(SKILLS_DIR)
            .join(&self.name)
    }

    /// `<root>/.claude/skills/<name>`
    pub fn claude_dir(&self, scope: Scope) -> PathBuf {
        self.root(scope)
            .join(CLAUDE_DIR)
            .join(SKILLS_DIR)
            .join(&self.name)
    }

    /// Leftovers from earlier installs, cleared before every install
    /// regardless of scope.
    pub fn stale_targets(&self) -> Vec<CleanupTarget> {
        vec![
            CleanupTarget::new(self.canonical_dir(Scope::Global), "canonical copy"),
            CleanupTarget::new(self.claude_dir(Scope::Global), "global skill link"),
            CleanupTarget::new(self.claude_dir(Scope::Local), "project skill"),
        ]
    }

    /// Paths removed by an uninstall in `scope`. Only the matching scope's
    /// Claude Code entry is included.
    pub fn uninstall_targets(&self, scope: Scope) -> Vec<CleanupTarget> {
        match scope {
            Scope::Global => vec![
                CleanupTarget::new(self.canonical_dir(Scope::Global), "canonical copy"),
                CleanupTarget::new(self.claude_dir(Scope::Global), "global skill link"),
            ],
            Scope::Local => vec![
                CleanupTarget::new(
                    self.canonical_dir(Scope::Local),
                    "project canonical copy",
                ),
                CleanupTarget::new(self.claude_dir(Scope::Local), "project skill"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SkillLayout {
        SkillLayout::new("/home/u", "/work/proj", "foo").expect("valid layout")
    }

    #[test]
    fn test_validate_skill_name_rejects_traversal() {
        assert!(validate_skill_name("foo").is_ok());
        assert!(validate_skill_name("hello-world").is_ok());
        assert!(validate_skill_name("").is_err());
        assert!(validate_skill_name("..").is_err());
        assert!(validate_skill_name(".").is_err());
        assert!(validate_skill_name("a/b").is_err());
        assert!(validate_skill_name("/etc").is_err());
        assert!(validate_skill_name("foo/").is_err());
    }

    #[test]
    fn test_paths_follow_root_convention() {
        let layout = layout();
        assert_eq!(
            layout.canonical_dir(Scope::Global),
            PathBuf::from("/home/u/.agents/skills/foo")
        );
        assert_eq!(
            layout.claude_dir(Scope::Local),
            PathBuf::from("/work/proj/.claude/skills/foo")
        );
    }

    #[test]
    fn test_stale_targets_cover_both_scopes() {
        let paths: Vec<_> = layout()
            .stale_targets()
            .into_iter()
            .map(|t| t.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/home/u/.agents/skills/foo"),
                PathBuf::from("/home/u/.claude/skills/foo"),
                PathBuf::from("/work/proj/.claude/skills/foo"),
            ]
        );
    }

    #[test]
    fn test_uninstall_targets_match_scope_only() {
        let layout = layout();

        let global: Vec<_> = layout
            .uninstall_targets(Scope::Global)
            .into_iter()
            .map(|t| t.path)
            .collect();
        assert!(global.iter().all(|p| p.starts_with("/home/u")));
        assert_eq!(global.len(), 2);

        let local: Vec<_> = layout
            .uninstall_targets(Scope::Local)
            .into_iter()
            .map(|t| t.path)
            .collect();
        assert_eq!(
            local,
            vec![
                PathBuf::from("/work/proj/.agents/skills/foo"),
                PathBuf::from("/work/proj/.claude/skills/foo"),
            ]
        );
    }
}
