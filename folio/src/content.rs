//! Portfolio content: the data every section is rendered from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED: &str = include_str!("../assets/portfolio.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    pub showcase: Showcase,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percent, clamped to 100 when rendered.
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showcase {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub url: String,
}

impl Portfolio {
    /// Content compiled into the binary.
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED).context("embedded portfolio content is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio content {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse portfolio content {}", path.display()))
    }

    /// Project categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for project in &self.projects {
            if !categories.contains(&project.category) {
                categories.push(project.category.clone());
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let portfolio = Portfolio::embedded().unwrap();
        assert!(!portfolio.profile.name.is_empty());
        assert!(portfolio.showcase.duration_secs > 0);
        assert!(!portfolio.projects.is_empty());
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let portfolio = Portfolio::embedded().unwrap();
        assert_eq!(portfolio.categories(), ["web", "mobile", "design"]);
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "{ \"profile\": 1 }").unwrap();

        let err = Portfolio::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("content.json"));
    }
}
