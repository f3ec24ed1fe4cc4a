//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::theme::Theme;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // Navigation links shown in the shell header
    #[serde(default)]
    pub links: Vec<NavLink>,

    // Directory holding the markdown documents, relative to the base dir
    pub content_dir: String,

    // Appearance
    pub default_theme: Theme,
    pub highlight_theme: String,
}

/// One external link in the shell header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "inkpress".to_string(),
            description: String::new(),
            author: String::new(),

            links: Vec::new(),

            content_dir: "data".to_string(),

            default_theme: Theme::Dark,
            highlight_theme: "base16-ocean.dark".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "inkpress");
        assert_eq!(config.content_dir, "data");
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.highlight_theme, "base16-ocean.dark");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: the thesaurus
author: Test User
default_theme: light
links:
  - name: github
    url: https://github.com/example
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "the thesaurus");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.links[0].name, "github");
        // Unspecified fields keep their defaults
        assert_eq!(config.content_dir, "data");
    }
}
