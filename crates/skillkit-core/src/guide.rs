//! Post-install usage guide.

use std::path::Path;

use serde::Serialize;

use crate::skills::{PackageInfo, skill_description};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageGuide {
    pub name: String,
    pub description: Option<String>,
    /// Trigger text from `SKILL.md`, falling back to the package description.
    pub usage: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
}

impl UsageGuide {
    pub fn load(package_root: &Path, skill_name: &str) -> anyhow::Result<Self> {
        let info = PackageInfo::load(package_root)?.unwrap_or_default();
        let instructions = skill_description(package_root)?;

        Ok(Self {
            name: info.name.unwrap_or_else(|| skill_name.to_string()),
            usage: instructions.or_else(|| info.description.clone()),
            description: info.description,
            homepage: info.homepage,
            repository: info.repository,
        })
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            RULE.to_string(),
            "  Skill installed successfully!".to_string(),
            RULE.to_string(),
            String::new(),
            format!("Skill:        {}", self.name),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("Description:  {}", description));
        }

        if let Some(usage) = &self.usage {
            lines.push(String::new());
            lines.push("How to use:".to_string());
            lines.push(format!("  {}", usage));
        }

        if self.homepage.is_some() || self.repository.is_some() {
            lines.push(String::new());
            lines.push("More information:".to_string());
            if let Some(homepage) = &self.homepage {
                lines.push(format!("  Docs:       {}", homepage));
            }
            if let Some(repository) = &self.repository {
                lines.push(format!("  Repository: {}", repository));
            }
        }

        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.join("\n")
    }
}
