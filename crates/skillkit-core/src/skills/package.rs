//! Package metadata: `package.json` and the `SKILL.md` frontmatter.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::validate_skill_name;

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const SKILL_DOCUMENT: &str = "SKILL.md";

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    description: Option<String>,
    homepage: Option<String>,
    repository: Option<Repository>,
}

/// npm allows `"repository": "url"` or `"repository": { "url": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repository {
    Url(String),
    Detailed { url: Option<String> },
}

/// The parts of `package.json` shown to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package name with any npm scope removed.
    pub name: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
}

impl PackageInfo {
    /// Load `<package_root>/package.json`. `Ok(None)` when the file is absent.
    pub fn load(package_root: &Path) -> anyhow::Result<Option<Self>> {
        let path = package_root.join(PACKAGE_MANIFEST);
        if !path.exists() {
            return Ok(None);
        }

        let bytes =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: PackageManifest = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let repository = match manifest.repository {
            Some(Repository::Url(url)) => Some(url),
            Some(Repository::Detailed { url }) => url,
            None => None,
        };

        Ok(Some(Self {
            name: manifest.name.as_deref().map(strip_npm_scope).map(str::to_string),
            description: manifest.description.filter(|d| !d.is_empty()),
            homepage: manifest.homepage.filter(|h| !h.is_empty()),
            repository: repository.filter(|r| !r.is_empty()),
        }))
    }
}

/// `@org/foo` -> `foo`; unscoped names are returned unchanged.
pub fn strip_npm_scope(name: &str) -> &str {
    match name.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => name,
    }
}

/// Pick the skill name: explicit override, then `package.json`, then the
/// package directory name.
pub fn resolve_skill_name(package_root: &Path, explicit: Option<&str>) -> anyhow::Result<String> {
    if let Some(name) = explicit {
        validate_skill_name(name)?;
        return Ok(name.to_string());
    }

    if let Some(name) = PackageInfo::load(package_root)?.and_then(|info| info.name) {
        validate_skill_name(&name)
            .with_context(|| format!("Unusable package name in {}", PACKAGE_MANIFEST))?;
        return Ok(name);
    }

    let name = package_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot derive a skill name from {}; pass --name",
                package_root.display()
            )
        })?;
    validate_skill_name(&name)?;
    Ok(name)
}

/// First `description:` line of `<package_root>/SKILL.md`, if any.
pub fn skill_description(package_root: &Path) -> anyhow::Result<Option<String>> {
    let path = package_root.join(SKILL_DOCUMENT);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_description(&content))
}

fn parse_description(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix("description:"))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
